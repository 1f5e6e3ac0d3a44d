use crate::ports::outbound::DomainProbe;
use crate::shared::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Upper bound on a WHOIS reply (DoS protection)
const MAX_WHOIS_REPLY: u64 = 256 * 1024;

/// DnsWhoisProbe adapter checking domains with the system resolver and WHOIS
///
/// Registration lookups start at the IANA WHOIS server, which names the
/// authoritative server for the TLD, and then ask that server for the domain.
pub struct DnsWhoisProbe {
    timeout: Duration,
    root_server: String,
    port: u16,
}

impl DnsWhoisProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            root_server: "whois.iana.org".to_string(),
            port: 43,
        }
    }

    /// Sends every WHOIS query to `host:port`, starting there instead of IANA
    pub fn with_whois_server(mut self, host: &str, port: u16) -> Self {
        self.root_server = host.to_string();
        self.port = port;
        self
    }

    async fn query(&self, server: &str, domain: &str) -> Result<String> {
        let exchange = async {
            let mut stream = TcpStream::connect((server, self.port)).await?;
            stream.write_all(format!("{}\r\n", domain).as_bytes()).await?;

            let mut reply = Vec::new();
            stream.take(MAX_WHOIS_REPLY).read_to_end(&mut reply).await?;
            Ok::<_, std::io::Error>(reply)
        };

        let reply = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| anyhow::anyhow!("WHOIS query to {} timed out", server))?
            .map_err(|e| anyhow::anyhow!("WHOIS query to {} failed: {}", server, e))?;

        Ok(String::from_utf8_lossy(&reply).into_owned())
    }
}

#[async_trait]
impl DomainProbe for DnsWhoisProbe {
    async fn resolves(&self, domain: &str) -> bool {
        match tokio::time::timeout(self.timeout, tokio::net::lookup_host((domain, 0))).await {
            Ok(Ok(mut addresses)) => addresses.next().is_some(),
            Ok(Err(e)) => {
                tracing::debug!("{} does not resolve: {}", domain, e);
                false
            }
            Err(_) => {
                tracing::debug!("Resolving {} timed out", domain);
                false
            }
        }
    }

    async fn registrar(&self, domain: &str) -> Result<Option<String>> {
        let root_reply = self.query(&self.root_server, domain).await?;

        match parse_referral(&root_reply) {
            Some(server) if !server.eq_ignore_ascii_case(&self.root_server) => {
                tracing::debug!("WHOIS for {} referred to {}", domain, server);
                let reply = self.query(&server, domain).await?;
                Ok(parse_registrar(&reply))
            }
            _ => Ok(parse_registrar(&root_reply)),
        }
    }
}

/// `key: value` pairs of a WHOIS reply, keys lower-cased
fn fields(reply: &str) -> impl Iterator<Item = (String, &str)> {
    reply.lines().filter_map(|line| {
        let (key, value) = line.split_once(':')?;
        Some((key.trim().to_lowercase(), value.trim()))
    })
}

/// Server named by a `refer:` or `whois:` line
fn parse_referral(reply: &str) -> Option<String> {
    fields(reply)
        .find(|(key, value)| (key == "refer" || key == "whois") && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Registrar named by a `Registrar:` or `Registrar Name:` line
fn parse_registrar(reply: &str) -> Option<String> {
    fields(reply)
        .find(|(key, value)| (key == "registrar" || key == "registrar name") && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
