//! `?reality=neon&particles=60` style deep links

use std::borrow::Cow;

use crate::error::{PortalError, Result};
use crate::particles::parse_particle_count;
use crate::realms::RealityId;

/// What a shared link asks the portal to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeepLink {
    pub reality: RealityId,
    /// Override for the burst particle count
    pub particles: Option<usize>,
    /// Press the gateway on load so the scan starts immediately
    pub open_vault: bool,
}

/// Parse `location.search`
///
/// Unknown keys are ignored. A bad value for a known key is an error so the
/// caller can log it and fall back to defaults.
pub fn parse_query(search: &str) -> Result<DeepLink> {
    let mut link = DeepLink::default();

    for pair in search.trim_start_matches('?').split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        // Keys we don't know are skipped, however they are encoded
        let Ok(key) = decode(key) else { continue };
        match key.as_ref() {
            "reality" | "r" => link.reality = RealityId::from_str(&decode(value)?)?,
            "particles" => link.particles = Some(parse_particle_count(&decode(value)?)?),
            "vault" => link.open_vault = matches!(decode(value)?.as_ref(), "" | "1" | "true"),
            _ => {}
        }
    }

    Ok(link)
}

/// Percent-decode one query component (`+` is a space in query strings)
fn decode(component: &str) -> Result<Cow<'_, str>> {
    if !component.contains(['%', '+']) {
        return Ok(Cow::Borrowed(component));
    }
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| Cow::Owned(decoded.into_owned()))
        .map_err(|e| PortalError::invalid("query", format!("`{component}`: {e}")))
}

/// Read and parse the current page's query (defaults on any problem)
#[cfg(target_arch = "wasm32")]
pub fn from_location() -> DeepLink {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    match parse_query(&search) {
        Ok(link) => link,
        Err(e) => {
            log::warn!("Ignoring deep link `{}`: {}", search, e);
            DeepLink::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        assert_eq!(parse_query(""), Ok(DeepLink::default()));
        assert_eq!(parse_query("?"), Ok(DeepLink::default()));
    }

    #[test]
    fn test_full_query() {
        let link = parse_query("?reality=celestial&particles=60&vault=1&utm_source=x").unwrap();
        assert_eq!(link.reality, RealityId::Celestial);
        assert_eq!(link.particles, Some(60));
        assert!(link.open_vault);

        let link = parse_query("r=abyss&vault").unwrap();
        assert_eq!(link.reality, RealityId::Abyss);
        assert!(link.open_vault);
    }

    #[test]
    fn test_percent_encoded_values() {
        let link = parse_query("?reality=celestial%20&particles=%36%30&vault=true").unwrap();
        assert_eq!(link.reality, RealityId::Celestial);
        assert_eq!(link.particles, Some(60));
        assert!(link.open_vault);

        let link = parse_query("?reality=+Neon+&%72=abyss").unwrap();
        assert_eq!(link.reality, RealityId::Abyss);

        // Junk in keys we ignore does not spoil the rest of the link
        let link = parse_query("?utm=%FF%FE&reality=deep").unwrap();
        assert_eq!(link.reality, RealityId::Abyss);

        // Invalid UTF-8 after decoding
        assert!(matches!(
            parse_query("?reality=%FF"),
            Err(PortalError::InvalidArgument { name: "query", .. })
        ));
    }

    #[test]
    fn test_bad_values() {
        assert!(matches!(
            parse_query("?reality=atlantis"),
            Err(PortalError::UnknownReality(_))
        ));
        assert!(matches!(
            parse_query("?particles=-5"),
            Err(PortalError::InvalidArgument { name: "count", .. })
        ));
    }
}
