use crate::controller::{RequestState, Status};
use qrcode::render::unicode;
use qrcode::QrCode;
use std::fmt::Write;
use wally_types::display::{
    explorer_link, visible_fields, APP_NAME, FAILURE_NOTICE, PRIVACY_STATEMENT, PURPOSE,
    QR_CAPTION, TAGLINE,
};

/// Address QR code as lines of half-block characters, light on dark
pub fn qr_lines(data: &str) -> Vec<String> {
    let code = match QrCode::new(data.as_bytes()) {
        Ok(code) => code,
        Err(_) => return vec!["Failed to render QR.".to_string()],
    };

    code.render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Plain-text rendering of the current state, for non-interactive output
pub fn render_plain(state: &RequestState, explorer_url: &str, source_url: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", APP_NAME, TAGLINE);
    let _ = writeln!(out);

    match (state.status(), state.wallet()) {
        (Status::Loaded, Some(wallet)) => {
            for field in visible_fields(state.show_seed_phrase()) {
                let _ = writeln!(out, "{:<12} {}", field.label(), wallet.field(field));
            }
            let _ = writeln!(out);
            for line in qr_lines(&wallet.btc_address) {
                let _ = writeln!(out, "{}", line);
            }
            let _ = writeln!(out, "{}", QR_CAPTION);
            if let Some(link) = explorer_link(explorer_url, &wallet.btc_address) {
                let _ = writeln!(out, "{}", link);
            }
        }
        (status, _) => {
            if status == Status::Loading {
                let _ = writeln!(out, "Generating wallet...");
            } else if status == Status::Failed {
                let _ = writeln!(out, "{}", FAILURE_NOTICE);
            }
            let _ = writeln!(out, "{}", PURPOSE);
            let _ = writeln!(out, "{}", PRIVACY_STATEMENT);
            let _ = writeln!(out, "Source: {}", source_url);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wally_types::WalletRecord;

    #[test]
    fn test_qr_lines_not_empty() {
        let lines = qr_lines("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
        assert!(lines.len() > 10);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_idle_state_renders_information() {
        let state = RequestState::default();
        let text = render_plain(&state, "https://mempool.space/address/", "https://example.com/src");
        assert!(text.contains(PRIVACY_STATEMENT));
        assert!(text.contains("https://example.com/src"));
        assert!(!text.contains(FAILURE_NOTICE));
    }

    #[test]
    fn test_loaded_state_hides_seed_phrase_by_default() {
        let wallet = WalletRecord::new("1A1zP", "5Kb8", "abandon ability able");
        let state = RequestState::with_wallet(wallet.clone(), false);
        let text = render_plain(&state, "https://mempool.space/address/", "");
        assert!(text.contains("1A1zP"));
        assert!(text.contains("5Kb8"));
        assert!(!text.contains("abandon"));
        assert!(text.contains("https://mempool.space/address/1A1zP"));
        assert!(text.contains(QR_CAPTION));

        let state = RequestState::with_wallet(wallet, true);
        let text = render_plain(&state, "", "");
        assert!(text.contains("abandon ability able"));
        assert!(!text.contains("mempool"));
    }
}
