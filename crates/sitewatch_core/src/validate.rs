use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("site name is required")]
    MissingName,
    #[error("site url is required")]
    MissingUrl,
    #[error("invalid site url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Trimmed, validated input for registering a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSite {
    pub name: String,
    pub url: String,
}

/// Both fields are required; the url must be an absolute http(s) URL with a host.
pub fn validate_new_site(name: &str, url: &str) -> Result<NewSite, ValidationError> {
    let name = name.trim();
    let url = url.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if url.is_empty() {
        return Err(ValidationError::MissingUrl);
    }

    let parsed = Url::parse(url).map_err(|err| ValidationError::InvalidUrl {
        url: url.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(ValidationError::InvalidUrl {
            url: url.to_string(),
            reason: "missing host".into(),
        });
    }

    Ok(NewSite {
        name: name.to_string(),
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(validate_new_site("", "http://x"), Err(ValidationError::MissingName));
        assert_eq!(validate_new_site("  ", "http://x"), Err(ValidationError::MissingName));
        assert_eq!(validate_new_site("Name", ""), Err(ValidationError::MissingUrl));
    }

    #[test]
    fn non_http_urls_are_rejected() {
        assert!(matches!(
            validate_new_site("Name", "ftp://example.com"),
            Err(ValidationError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_new_site("Name", "example.com/page"),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn accepts_and_trims_valid_input() {
        let site = validate_new_site(" Name ", " http://x ").unwrap();
        assert_eq!(site.name, "Name");
        assert_eq!(site.url, "http://x");
    }
}
