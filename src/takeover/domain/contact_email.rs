/// A maintainer email that passed the basic `local@domain` shape check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail {
    address: String,
    domain: String,
}

impl ContactEmail {
    /// Returns `None` for anything that is not a plausible address: zero or several
    /// `@`, an empty local part, or a domain without a dot.
    pub fn parse(raw: &str) -> Option<Self> {
        let address = raw.trim();
        if address.chars().any(char::is_whitespace) {
            return None;
        }

        let (local, domain) = address.split_once('@')?;
        if local.is_empty() || domain.contains('@') {
            return None;
        }

        let domain = domain.trim_end_matches('.').to_lowercase();
        if domain.is_empty() || !domain.contains('.') || domain.starts_with('.') {
            return None;
        }

        Some(Self {
            address: address.to_string(),
            domain,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Lower-cased mail domain
    pub fn domain(&self) -> &str {
        &self.domain
    }
}
