use crate::config::WebConfig;
use crate::error::{AppError, AppResult};
use askama::Template;
use qrcode::render::svg;
use qrcode::QrCode;
use wally_types::display::{
    APP_NAME, FAILURE_NOTICE, PRIVACY_STATEMENT, PURPOSE, QR_CAPTION, TAGLINE, TOAST_DURATION_MS,
};
use wally_types::WalletField;

/// Longest payload accepted by the QR endpoint
pub const MAX_QR_DATA_LEN: usize = 512;

/// Edge length of the rendered QR image in pixels
const QR_SIZE_PX: u32 = 200;

/// The single-page generator UI
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub app_name: &'a str,
    pub tagline: &'a str,
    pub purpose: &'a str,
    pub privacy_statement: &'a str,
    pub failure_notice: &'a str,
    pub qr_caption: &'a str,
    pub source_url: &'a str,
    pub explorer_url: &'a str,
    pub show_seed_phrase: bool,
    pub toast_duration_ms: u64,
    pub fields: &'a [WalletField],
}

impl<'a> IndexPage<'a> {
    pub fn new(web: &'a WebConfig) -> Self {
        Self {
            app_name: APP_NAME,
            tagline: TAGLINE,
            purpose: PURPOSE,
            privacy_statement: PRIVACY_STATEMENT,
            failure_notice: FAILURE_NOTICE,
            qr_caption: QR_CAPTION,
            source_url: &web.source_url,
            explorer_url: &web.explorer_url,
            show_seed_phrase: web.show_seed_phrase,
            toast_duration_ms: TOAST_DURATION_MS,
            fields: &WalletField::ALL,
        }
    }

    pub fn render_html(&self) -> askama::Result<String> {
        self.render()
    }
}

/// Encode `data` as an SVG QR code
pub fn qr_svg(data: &str) -> AppResult<String> {
    if data.is_empty() {
        return Err(AppError::bad_request("missing QR data"));
    }
    if data.len() > MAX_QR_DATA_LEN {
        return Err(AppError::bad_request(format!(
            "QR data longer than {} bytes",
            MAX_QR_DATA_LEN
        )));
    }

    let code = QrCode::new(data.as_bytes())
        .map_err(|e| AppError::bad_request(format!("cannot encode QR data: {}", e)))?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(QR_SIZE_PX, QR_SIZE_PX)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_svg_renders_address() {
        let svg = qr_svg("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#000000"));
    }

    #[test]
    fn test_qr_svg_rejects_empty_and_oversized() {
        assert!(matches!(qr_svg(""), Err(AppError::BadRequest(_))));
        let long = "x".repeat(MAX_QR_DATA_LEN + 1);
        assert!(matches!(qr_svg(&long), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_index_page_carries_display_contract() {
        let web = WebConfig::default();
        let html = IndexPage::new(&web).render_html().unwrap();
        assert!(html.contains(PRIVACY_STATEMENT));
        assert!(html.contains("github.com"));
        assert!(html.contains("data-key=\"btcAddress\""));
        assert!(html.contains("data-key=\"seedPhrase\""));
        assert!(html.contains("/api/walletGen?_="));
    }

    #[test]
    fn test_page_drops_previous_wallet_when_loading_starts() {
        let web = WebConfig::default();
        let html = IndexPage::new(&web).render_html().unwrap();
        let start = html.find("async function generateWallet").unwrap();
        let body = &html[start..];
        let cleared = body.find("state.wallet = null;").unwrap();
        let loading = body.find("state.status = 'loading';").unwrap();
        assert!(cleared < loading);
    }
}
