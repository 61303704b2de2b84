//! Scraping of the confirm page.
//!
//! The confirm step is plain Web Forms: fetch the page, lift the hidden
//! `__VIEWSTATE` and `ctl00_rnHf` inputs, post them back, and read the
//! thank-you label out of the response. ASP.NET renders hidden inputs
//! with the `id` attribute ahead of `value`, which is what the patterns
//! here rely on.

use std::sync::LazyLock;

use regex::Regex;

static VIEWSTATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"id="__VIEWSTATE"[^>]*\bvalue="([^"]*)""#).expect("viewstate pattern is valid")
});

static RN_HF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"id="ctl00_rnHf"[^>]*\bvalue="([^"]*)""#).expect("rnHf pattern is valid")
});

static THANK_YOU: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"id="ctl00_pageContentHolder_lblThankYou"[^>]*>([^<]*)<"#)
        .expect("thank-you pattern is valid")
});

/// Server-issued tokens lifted from the confirm page. Both must be posted
/// back verbatim or the site discards the staged reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmTokens {
    pub view_state: String,
    pub rn_hf: String,
}

impl ConfirmTokens {
    /// Form fields for the confirm POST, keyed the way the site expects.
    pub fn form_fields(&self) -> [(&'static str, &str); 2] {
        [
            ("__VIEWSTATE", self.view_state.as_str()),
            ("ctl00$rnHf", self.rn_hf.as_str()),
        ]
    }
}

/// Extract both hidden tokens, or `None` when either is missing.
pub fn hidden_fields(page: &str) -> Option<ConfirmTokens> {
    let view_state = VIEWSTATE.captures(page)?.get(1)?.as_str().to_string();
    let rn_hf = RN_HF.captures(page)?.get(1)?.as_str().to_string();
    Some(ConfirmTokens { view_state, rn_hf })
}

/// Non-empty text of the thank-you label, the site's only success marker.
pub fn confirmation_text(page: &str) -> Option<String> {
    let text = THANK_YOU.captures(page)?.get(1)?.as_str().trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIRM_PAGE: &str = r#"<html><body>
        <form method="post" action="./AddFamilyMembersScheduler.aspx">
        <input type="hidden" name="__VIEWSTATE" id="__VIEWSTATE" value="/wEPDwUKLTg3MjA1NzQ4NA9kFgJmD2Q=" />
        <input type="hidden" name="ctl00$rnHf" id="ctl00_rnHf" value="5fb3c2d1" />
        </form></body></html>"#;

    #[test]
    fn test_hidden_fields_extracted() {
        let tokens = hidden_fields(CONFIRM_PAGE).unwrap();
        assert_eq!(tokens.view_state, "/wEPDwUKLTg3MjA1NzQ4NA9kFgJmD2Q=");
        assert_eq!(tokens.rn_hf, "5fb3c2d1");
    }

    #[test]
    fn test_form_fields_use_posted_names() {
        let tokens = ConfirmTokens {
            view_state: "vs".to_string(),
            rn_hf: "hf".to_string(),
        };
        assert_eq!(
            tokens.form_fields(),
            [("__VIEWSTATE", "vs"), ("ctl00$rnHf", "hf")]
        );
    }

    #[test]
    fn test_missing_token_yields_none() {
        assert!(hidden_fields("<html><body>session expired</body></html>").is_none());
        let viewstate_only = r#"<input id="__VIEWSTATE" value="x" />"#;
        assert!(hidden_fields(viewstate_only).is_none());
    }

    #[test]
    fn test_confirmation_text_present() {
        let page = r#"<span id="ctl00_pageContentHolder_lblThankYou" class="confirm">
            Thank you for your reservation!</span>"#;
        assert_eq!(
            confirmation_text(page).as_deref(),
            Some("Thank you for your reservation!")
        );
    }

    #[test]
    fn test_empty_confirmation_is_failure() {
        let page = r#"<span id="ctl00_pageContentHolder_lblThankYou"></span>"#;
        assert_eq!(confirmation_text(page), None);
        assert_eq!(confirmation_text("<html></html>"), None);
    }
}
