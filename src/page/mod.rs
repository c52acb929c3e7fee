//! Output page assembly
//!
//! The generated page is a single HTML file: the password form, a JSON block
//! with everything the script needs to decrypt, and the script itself. The
//! script re-derives the key with WebCrypto using the parameters from the
//! JSON block, so the values written there are taken from the same
//! constants the Rust derivation uses.

mod extract;
pub mod remember;

use askama::Template;
use serde::{Deserialize, Serialize};

use crate::config::TemplateOptions;
use crate::crypto::{
    kdf, EncryptedPayload, KdfParams, Salt, FORMAT_VERSION, REMEMBER_PARAM, SHARE_PARAM,
};
use crate::error::{Result, SealPageError};

pub use extract::extract_payload;
pub use remember::RememberPolicy;

/// `id` of the JSON block inside the page
pub const CONFIG_ELEMENT_ID: &str = "sealpage-config";

/// Decryption parameters embedded in the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedPayload {
    pub version: u32,
    pub salt: String,
    /// Base64 nonce
    pub iv: String,
    /// Base64 ciphertext with tag
    pub ciphertext: String,
    pub iterations: u32,
    pub share_label: String,
    pub key_label: String,
    pub remember_days: u32,
}

impl EmbeddedPayload {
    pub fn new(
        payload: &EncryptedPayload,
        salt: &Salt,
        params: &KdfParams,
        remember: RememberPolicy,
    ) -> Self {
        let (iv, ciphertext) = payload.to_base64_parts();
        Self {
            version: FORMAT_VERSION,
            salt: salt.to_hex(),
            iv,
            ciphertext,
            iterations: params.iterations,
            share_label: kdf::SHARE_LABEL.to_string(),
            key_label: kdf::KEY_LABEL.to_string(),
            remember_days: remember.days(),
        }
    }

    pub fn salt(&self) -> Result<Salt> {
        Salt::parse(&self.salt)
    }

    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            iterations: self.iterations,
        }
    }

    /// Decode the ciphertext; fails for pages from a newer format
    pub fn encrypted_payload(&self) -> Result<EncryptedPayload> {
        if self.version != FORMAT_VERSION
            || self.share_label != kdf::SHARE_LABEL
            || self.key_label != kdf::KEY_LABEL
        {
            return Err(SealPageError::NotAProtectedPage(format!(
                "unsupported format version {}",
                self.version
            )));
        }
        EncryptedPayload::from_base64_parts(&self.iv, &self.ciphertext)
    }
}

/// JSON block contents: the payload plus names the script uses
#[derive(Serialize)]
struct ScriptConfig<'a> {
    #[serde(flatten)]
    payload: &'a EmbeddedPayload,
    storage_key: &'static str,
    storage_expiration: &'static str,
    share_param: &'static str,
    remember_param: &'static str,
    logout_param: &'static str,
}

#[derive(Template)]
#[template(path = "password_template.html")]
struct PasswordPage<'a> {
    options: &'a TemplateOptions,
    remember_enabled: bool,
    config_element_id: &'static str,
    config_json: String,
}

/// JSON that is safe inside a `<script>` element
fn script_safe_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Render the protected page
pub fn assemble(
    payload: &EncryptedPayload,
    salt: &Salt,
    params: &KdfParams,
    options: &TemplateOptions,
    remember: RememberPolicy,
) -> Result<String> {
    let embedded = EmbeddedPayload::new(payload, salt, params, remember);
    let script_config = ScriptConfig {
        payload: &embedded,
        storage_key: remember::STORAGE_KEY,
        storage_expiration: remember::STORAGE_EXPIRATION,
        share_param: SHARE_PARAM,
        remember_param: REMEMBER_PARAM,
        logout_param: remember::LOGOUT_PARAM,
    };

    let page = PasswordPage {
        options,
        remember_enabled: remember.is_enabled(),
        config_element_id: CONFIG_ELEMENT_ID,
        config_json: script_safe_json(&script_config)?,
    };

    Ok(page.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{self, DerivedKey};

    fn sample_payload() -> EncryptedPayload {
        let key = DerivedKey::from_bytes(&[5; 32]).unwrap();
        crypto::encrypt(b"<h1>secret</h1>", &key).unwrap()
    }

    fn salt() -> Salt {
        Salt::parse("0123456789abcdef0123456789abcdef").unwrap()
    }

    #[test]
    fn test_page_embeds_parameters() {
        let payload = sample_payload();
        let html = assemble(
            &payload,
            &salt(),
            &KdfParams::default(),
            &TemplateOptions::default(),
            RememberPolicy::Disabled,
        )
        .unwrap();

        let embedded = extract_payload(&html).unwrap();
        assert_eq!(embedded.salt, "0123456789abcdef0123456789abcdef");
        assert_eq!(embedded.iterations, kdf::DEFAULT_ITERATIONS);
        assert_eq!(embedded.share_label, kdf::SHARE_LABEL);
        assert_eq!(embedded.key_label, kdf::KEY_LABEL);
        assert_eq!(embedded.version, FORMAT_VERSION);
        assert_eq!(embedded.encrypted_payload().unwrap(), payload);
    }

    #[test]
    fn test_page_does_not_contain_plaintext() {
        let html = assemble(
            &sample_payload(),
            &salt(),
            &KdfParams::default(),
            &TemplateOptions::default(),
            RememberPolicy::Disabled,
        )
        .unwrap();

        assert!(!html.contains("<h1>secret</h1>"));
    }

    #[test]
    fn test_ui_strings_are_escaped() {
        let options = TemplateOptions::default()
            .with_title("<script>alert(1)</script>")
            .with_instructions("Ask Bob & Alice");

        let html = assemble(
            &sample_payload(),
            &salt(),
            &KdfParams::testing(),
            &options,
            RememberPolicy::Disabled,
        )
        .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)"));
        assert!(html.contains("Ask Bob &amp; Alice"));
    }

    #[test]
    fn test_remember_disabled_hides_checkbox() {
        let html = assemble(
            &sample_payload(),
            &salt(),
            &KdfParams::testing(),
            &TemplateOptions::default(),
            RememberPolicy::from_days(0),
        )
        .unwrap();

        assert!(!html.contains("id=\"sealpage-remember\""));
        assert_eq!(extract_payload(&html).unwrap().remember_days, 0);
    }

    #[test]
    fn test_remember_enabled_shows_checkbox() {
        let html = assemble(
            &sample_payload(),
            &salt(),
            &KdfParams::testing(),
            &TemplateOptions::default(),
            RememberPolicy::from_days(30),
        )
        .unwrap();

        assert!(html.contains("id=\"sealpage-remember\""));
        assert_eq!(extract_payload(&html).unwrap().remember_days, 30);
    }

    #[test]
    fn test_script_safe_json_escapes_closing_tags() {
        let json = script_safe_json(&"</script><b>&").unwrap();

        assert!(!json.contains('<'));
        assert!(!json.contains('>'));
        assert!(!json.contains('&'));
        assert_eq!(serde_json::from_str::<String>(&json).unwrap(), "</script><b>&");
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut embedded = EmbeddedPayload::new(
            &sample_payload(),
            &salt(),
            &KdfParams::testing(),
            RememberPolicy::Disabled,
        );
        embedded.version = FORMAT_VERSION + 1;

        assert!(matches!(
            embedded.encrypted_payload(),
            Err(SealPageError::NotAProtectedPage(_))
        ));
    }
}
