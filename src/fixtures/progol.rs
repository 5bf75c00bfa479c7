//! Progol coupon source. The coupon is scraped from a public page as plain
//! text lines like `1. América vs Puebla`, or read from a local file in the
//! same format.

use anyhow::{Context, Result};
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::FetchError;

pub const DEFAULT_COUPON_URL: &str = "https://www.quinielaposible.com/progol";

/// Matches 1–14 are the main coupon, 15–21 the "revancha".
pub const MAIN_MATCHES: u8 = 14;
pub const MAX_MATCHES: u8 = 21;

const SOURCE: &str = "quinielaposible";

static RE_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>").unwrap()
});
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static RE_MATCH_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:(\d{1,2})(?:\s*[.):\-]\s*|\s+))?(.+?)\s+(?:vs\.?|v|-)\s+(.+?)\s*$").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponMatch {
    pub number: u8,
    pub home_team: String,
    pub away_team: String,
    pub revancha: bool,
}

impl CouponMatch {
    pub fn new(number: u8, home_team: &str, away_team: &str) -> Self {
        CouponMatch {
            number,
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            revancha: number > MAIN_MATCHES,
        }
    }
}

/// Scraper for the quinielaposible.com Progol page.
pub struct QuinielaPosible {
    http: Client,
    url: String,
}

impl QuinielaPosible {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(QuinielaPosible {
            http,
            url: url.to_string(),
        })
    }

    pub async fn fetch_coupon(&self) -> Result<Vec<CouponMatch>> {
        debug!("Fetching Progol coupon from {}", self.url);
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                source_name: SOURCE.into(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                source_name: SOURCE.into(),
                status: resp.status().as_u16(),
            }
            .into());
        }

        let html = resp.text().await.context("Failed to read Progol page")?;
        let coupon = parse_coupon_html(&html);
        if coupon.is_empty() {
            return Err(FetchError::Malformed {
                source_name: SOURCE.into(),
                reason: "no matches found on page".into(),
            }
            .into());
        }
        info!("Progol coupon: {} match(es) from {}", coupon.len(), SOURCE);
        Ok(coupon)
    }
}

pub fn load_coupon_file(path: &Path) -> Result<Vec<CouponMatch>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read coupon file {}", path.display()))?;
    let coupon = parse_coupon_text(&text);
    if coupon.is_empty() {
        anyhow::bail!("no matches found in coupon file {}", path.display());
    }
    Ok(coupon)
}

/// Strip markup into one line per tag boundary, then parse as text.
pub fn parse_coupon_html(html: &str) -> Vec<CouponMatch> {
    let without_scripts = RE_SCRIPT.replace_all(html, "\n");
    let text = RE_TAG.replace_all(&without_scripts, "\n");
    parse_coupon_text(&decode_entities(&text))
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Parse `[number][.)-] Home vs Away` lines. Lines without a number follow
/// the previous one; duplicate numbers keep the first occurrence.
pub fn parse_coupon_text(text: &str) -> Vec<CouponMatch> {
    let mut matches: BTreeMap<u8, CouponMatch> = BTreeMap::new();
    let mut last_number = 0u8;

    for line in text.lines() {
        let Some(caps) = RE_MATCH_LINE.captures(line) else {
            continue;
        };
        let home = caps[2].trim();
        let away = caps[3].trim();
        if !plausible_team(home) || !plausible_team(away) {
            continue;
        }

        let number = match caps.get(1).and_then(|m| m.as_str().parse::<u8>().ok()) {
            Some(n) => n,
            None => last_number.saturating_add(1),
        };
        if number == 0 || number > MAX_MATCHES {
            debug!("Ignoring coupon line numbered {}: {}", number, line.trim());
            continue;
        }
        last_number = number;

        if matches.contains_key(&number) {
            warn!("Duplicate coupon number {}, keeping the first", number);
            continue;
        }
        matches.insert(number, CouponMatch::new(number, home, away));
        if matches.len() == MAX_MATCHES as usize {
            break;
        }
    }

    matches.into_values().collect()
}

fn plausible_team(name: &str) -> bool {
    !name.is_empty() && name.chars().count() <= 40 && name.chars().any(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbered_lines_with_mixed_separators() {
        let text = "\
Progol 2250
1. América vs Puebla
2) Cruz Azul VS Pumas
3- Toluca v Atlas
4 Chivas - Tigres
nothing to see here
";
        let coupon = parse_coupon_text(text);
        assert_eq!(coupon.len(), 4);
        assert_eq!(coupon[0], CouponMatch::new(1, "América", "Puebla"));
        assert_eq!(coupon[1].home_team, "Cruz Azul");
        assert_eq!(coupon[1].away_team, "Pumas");
        assert_eq!(coupon[2].away_team, "Atlas");
        assert_eq!(coupon[3].home_team, "Chivas");
        assert_eq!(coupon[3].away_team, "Tigres");
    }

    #[test]
    fn separator_without_space_after_the_number() {
        let coupon = parse_coupon_text("1.América vs Puebla\n2)Cruz Azul vs Pumas\n3 - Toluca vs Atlas");
        assert_eq!(coupon[0], CouponMatch::new(1, "América", "Puebla"));
        assert_eq!(coupon[1], CouponMatch::new(2, "Cruz Azul", "Pumas"));
        assert_eq!(coupon[2], CouponMatch::new(3, "Toluca", "Atlas"));
    }

    #[test]
    fn unnumbered_lines_are_numbered_sequentially() {
        let coupon = parse_coupon_text("Arsenal vs Chelsea\nLeón vs Santos\n14. Inter vs Milan\nFlamengo vs Santos");
        let numbers: Vec<u8> = coupon.iter().map(|m| m.number).collect();
        assert_eq!(numbers, vec![1, 2, 14, 15]);
        assert!(!coupon[2].revancha);
        assert!(coupon[3].revancha);
    }

    #[test]
    fn duplicates_keep_first_and_output_is_sorted() {
        let coupon = parse_coupon_text("3. A vs B\n1. C vs D\n3. E vs F");
        assert_eq!(coupon.len(), 2);
        assert_eq!(coupon[0].number, 1);
        assert_eq!(coupon[1], CouponMatch::new(3, "A", "B"));
    }

    #[test]
    fn at_most_twenty_one_matches() {
        let text: String = (1..=30)
            .map(|i| format!("Home{} vs Away{}\n", i, i))
            .collect();
        let coupon = parse_coupon_text(&text);
        assert_eq!(coupon.len(), 21);
        assert_eq!(coupon.last().unwrap().number, 21);
    }

    #[test]
    fn html_is_stripped_and_entities_decoded() {
        let html = r#"<html><head><style>.x { color: red }</style>
<script>var a = "1. Fake vs Match";</script></head>
<body><table>
<tr><td>1.</td><td>Atl&eacute;tico</td></tr>
<tr><td>1. Brighton &amp; Hove Albion vs Man&nbsp;City</td></tr>
<tr><td>2. Queens&#39; Park vs &quot;Rangers&quot;</td></tr>
</table></body></html>"#;
        let coupon = parse_coupon_html(html);
        assert_eq!(coupon.len(), 2);
        assert_eq!(coupon[0].home_team, "Brighton & Hove Albion");
        assert_eq!(coupon[0].away_team, "Man City");
        assert_eq!(coupon[1].home_team, "Queens' Park");
        assert_eq!(coupon[1].away_team, "\"Rangers\"");
    }

    #[test]
    fn coupon_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("loly-coupon-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("coupon.txt");
        std::fs::write(&path, "1. Monterrey vs Tigres\n15. Necaxa vs Atlas\n").unwrap();
        let coupon = load_coupon_file(&path).unwrap();
        assert_eq!(coupon.len(), 2);
        assert!(coupon[1].revancha);

        std::fs::write(&path, "no matches\n").unwrap();
        assert!(load_coupon_file(&path).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
