//! Forecast request URLs.
//!
//! The query string is always laid out as `q`, `appid`, optional `units`,
//! then `cnt`, so two requests for the same inputs are byte-identical.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;

use crate::{error::WeatherError, units::UnitSystem};

/// Number of forecast timestamps requested from the API.
pub const FORECAST_COUNT: u32 = 1;

/// Bytes left as-is in a query value. Space is handled separately (`+`).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A user-supplied place such as `"London"` or `"Great Neck Plaza,NY,US"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Only an empty location is rejected; anything else is passed through.
    pub fn new(location: impl Into<String>) -> Result<Self, WeatherError> {
        let location = location.into();
        if location.is_empty() {
            return Err(WeatherError::InvalidLocation);
        }
        Ok(Self(location))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything needed to form one forecast request.
#[derive(Clone)]
pub struct RequestSpec {
    pub api_host: String,
    pub api_path: String,
    api_key: String,
    pub location: LocationQuery,
    pub units: UnitSystem,
}

impl RequestSpec {
    pub fn new(
        api_host: impl Into<String>,
        api_path: impl Into<String>,
        api_key: impl Into<String>,
        location: LocationQuery,
        units: UnitSystem,
    ) -> Self {
        Self {
            api_host: api_host.into(),
            api_path: api_path.into(),
            api_key: api_key.into(),
            location,
            units,
        }
    }

    /// Consume the request and produce its URL.
    pub fn into_url(self) -> String {
        build_forecast_url(
            &self.api_host,
            &self.api_path,
            &self.api_key,
            self.location.as_str(),
            self.units,
        )
    }
}

// The API key never appears in debug output.
impl fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSpec")
            .field("api_host", &self.api_host)
            .field("api_path", &self.api_path)
            .field("api_key", &"****")
            .field("location", &self.location)
            .field("units", &self.units)
            .finish()
    }
}

/// Build the forecast URL for `location`.
///
/// ```
/// use weathercaster_core::{UnitSystem, build_forecast_url};
///
/// let url = build_forecast_url(
///     "https://api.openweathermap.org",
///     "/data/2.5/forecast",
///     "KEY",
///     "Great Neck Plaza,NY,US",
///     UnitSystem::Metric,
/// );
/// assert_eq!(
///     url,
///     "https://api.openweathermap.org/data/2.5/forecast/?q=Great+Neck+Plaza%2CNY%2CUS&appid=KEY&units=metric&cnt=1"
/// );
/// ```
pub fn build_forecast_url(
    api_host: &str,
    api_path: &str,
    api_key: &str,
    location: &str,
    units: UnitSystem,
) -> String {
    let mut url = format!(
        "{}{}/?q={}&appid={}",
        api_host.trim_end_matches('/'),
        api_path,
        query_escape(location),
        query_escape(api_key),
    );

    if let Some(units) = units.query_value() {
        url.push_str("&units=");
        url.push_str(units);
    }

    url.push_str(&format!("&cnt={FORECAST_COUNT}"));
    url
}

/// Escape a query value: spaces become `+`, everything outside the
/// unreserved set is percent-encoded.
fn query_escape(value: &str) -> String {
    value
        .split(' ')
        .map(|part| utf8_percent_encode(part, QUERY_VALUE).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    const HOST: &str = "https://api.openweathermap.org";
    const PATH: &str = "/data/2.5/forecast";
    const KEY: &str = "DummyAPIKey";
    const CITY: &str = "Great Neck Plaza,NY,US";

    fn query_of(url: &str) -> &str {
        url.split_once('?').map(|(_, q)| q).expect("url has a query")
    }

    fn query_param<'a>(url: &'a str, name: &str) -> Option<&'a str> {
        query_of(url)
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v)
    }

    #[test]
    fn builds_exact_url_for_each_unit_system() {
        let cases = [
            (
                UnitSystem::Standard,
                "https://api.openweathermap.org/data/2.5/forecast/?q=Great+Neck+Plaza%2CNY%2CUS&appid=DummyAPIKey&cnt=1",
            ),
            (
                UnitSystem::Metric,
                "https://api.openweathermap.org/data/2.5/forecast/?q=Great+Neck+Plaza%2CNY%2CUS&appid=DummyAPIKey&units=metric&cnt=1",
            ),
            (
                UnitSystem::Imperial,
                "https://api.openweathermap.org/data/2.5/forecast/?q=Great+Neck+Plaza%2CNY%2CUS&appid=DummyAPIKey&units=imperial&cnt=1",
            ),
        ];

        for (units, want) in cases {
            let got = build_forecast_url(HOST, PATH, KEY, CITY, units);
            assert_eq!(got, want, "units {units}");
        }
    }

    #[test]
    fn units_parameter_omitted_only_for_standard() {
        for units in UnitSystem::all() {
            let url = build_forecast_url(HOST, PATH, KEY, CITY, *units);
            match units {
                UnitSystem::Standard => {
                    assert_eq!(query_param(&url, "units"), None);
                    assert!(!url.contains("standard"));
                }
                other => assert_eq!(query_param(&url, "units"), Some(other.as_str())),
            }
        }
    }

    #[test]
    fn parameters_are_in_fixed_order() {
        let url = build_forecast_url(HOST, PATH, KEY, CITY, UnitSystem::Imperial);
        let names: Vec<_> = query_of(&url)
            .split('&')
            .filter_map(|pair| pair.split_once('=').map(|(k, _)| k))
            .collect();
        assert_eq!(names, ["q", "appid", "units", "cnt"]);
    }

    #[test]
    fn reserved_characters_decode_back_to_location() {
        let locations = [
            CITY,
            "São Paulo,BR",
            "a&b=c?d",
            "100% Town",
            "Saint-Étienne, FR",
        ];

        for location in locations {
            let url = build_forecast_url(HOST, PATH, KEY, location, UnitSystem::Metric);
            let q = query_param(&url, "q").expect("q parameter");

            assert!(
                !q.contains(' ') && !q.contains(','),
                "unescaped characters in {q}"
            );

            let decoded = percent_decode_str(&q.replace('+', " "))
                .decode_utf8()
                .expect("valid utf-8")
                .into_owned();
            assert_eq!(decoded, location);
        }
    }

    #[test]
    fn trailing_slash_on_host_is_ignored() {
        let units = UnitSystem::Metric;
        let with_slash = build_forecast_url("http://localhost:8080/", PATH, KEY, "Paris", units);
        let without = build_forecast_url("http://localhost:8080", PATH, KEY, "Paris", units);
        assert_eq!(with_slash, without);
    }

    #[test]
    fn request_spec_builds_same_url() {
        let location = LocationQuery::new(CITY).unwrap();
        let spec = RequestSpec::new(HOST, PATH, KEY, location, UnitSystem::Standard);
        assert_eq!(
            spec.into_url(),
            build_forecast_url(HOST, PATH, KEY, CITY, UnitSystem::Standard)
        );
    }

    #[test]
    fn request_spec_debug_masks_api_key() {
        let location = LocationQuery::new("Paris").unwrap();
        let spec = RequestSpec::new(HOST, PATH, "SECRET123", location, UnitSystem::Metric);
        let debug = format!("{spec:?}");
        assert!(!debug.contains("SECRET123"));
        assert!(debug.contains("****"));
    }

    #[test]
    fn only_empty_location_is_rejected() {
        assert!(matches!(
            LocationQuery::new(""),
            Err(WeatherError::InvalidLocation)
        ));
        assert_eq!(LocationQuery::new("   ").unwrap().as_str(), "   ");
        assert_eq!(LocationQuery::new(" Paris ").unwrap().as_str(), " Paris ");
    }
}
