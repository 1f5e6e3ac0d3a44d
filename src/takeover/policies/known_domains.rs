use std::collections::HashSet;

/// Mail providers whose domains are permanently registered and never claimable
const KNOWN_PROVIDER_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "outlook.com",
    "hotmail.com",
    "live.com",
    "msn.com",
    "yahoo.com",
    "ymail.com",
    "icloud.com",
    "me.com",
    "mac.com",
    "aol.com",
    "protonmail.com",
    "proton.me",
    "pm.me",
    "gmx.com",
    "gmx.de",
    "gmx.net",
    "web.de",
    "mail.ru",
    "yandex.ru",
    "yandex.com",
    "qq.com",
    "163.com",
    "126.com",
    "fastmail.com",
    "zoho.com",
    "hey.com",
    "tutanota.com",
    "users.noreply.github.com",
];

/// Domains excluded from the dangling-domain check
#[derive(Debug, Clone)]
pub struct KnownDomains {
    domains: HashSet<String>,
}

impl KnownDomains {
    /// The built-in provider list
    pub fn builtin() -> Self {
        Self {
            domains: KNOWN_PROVIDER_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// The built-in list plus user-configured domains
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known = Self::builtin();
        known
            .domains
            .extend(extra.into_iter().map(|d| d.as_ref().trim().to_lowercase()));
        known
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(&domain.to_lowercase())
    }
}

impl Default for KnownDomains {
    fn default() -> Self {
        Self::builtin()
    }
}
