use crate::config::{GeocoderKind, LocatorConfig};
use crate::features::error::GeocodeError;
use crate::structs::CanonicalMetadata;
use reverse_geocoder::ReverseGeocoder;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

/// Resolves a coordinate pair to a postal address.
///
/// `Ok(None)` means the provider answered but knows no address there.
pub trait AddressResolver {
    fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> impl Future<Output = Result<Option<String>, GeocodeError>> + Send;
}

/// Nearest populated place from the GeoNames dataset bundled with `reverse_geocoder`.
pub struct OfflineResolver {
    geocoder: ReverseGeocoder,
}

impl OfflineResolver {
    pub fn new() -> Self {
        Self {
            geocoder: ReverseGeocoder::new(),
        }
    }

    /// `"name, admin2, admin1, Country"`, skipping empty parts.
    pub fn lookup(&self, latitude: f64, longitude: f64) -> String {
        let record = self.geocoder.search((latitude, longitude)).record;
        let country = rust_iso3166::from_alpha2(&record.cc)
            .map_or_else(|| record.cc.clone(), |c| c.name.to_string());
        [
            record.name.as_str(),
            record.admin2.as_str(),
            record.admin1.as_str(),
            country.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

impl Default for OfflineResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressResolver for OfflineResolver {
    async fn resolve(&self, latitude: f64, longitude: f64) -> Result<Option<String>, GeocodeError> {
        Ok(Some(self.lookup(latitude, longitude)))
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
    error: Option<String>,
}

impl NominatimResponse {
    fn into_address(self) -> Option<String> {
        if let Some(error) = self.error {
            log::debug!("nominatim has no address: {error}");
            return None;
        }
        self.display_name.filter(|name| !name.trim().is_empty())
    }
}

/// OpenStreetMap Nominatim reverse geocoding over HTTP.
pub struct NominatimResolver {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl NominatimResolver {
    pub fn new(config: &LocatorConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.geocode_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.nominatim_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }
}

impl AddressResolver for NominatimResolver {
    async fn resolve(&self, latitude: f64, longitude: f64) -> Result<Option<String>, GeocodeError> {
        let response: NominatimResponse = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", format!("{latitude:.6}")),
                ("lon", format!("{longitude:.6}")),
                ("accept-language", self.language.clone()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.into_address())
    }
}

/// The resolver selected by [`LocatorConfig::geocoder`].
pub enum Geocoder {
    Offline(OfflineResolver),
    Nominatim(NominatimResolver),
    Disabled,
}

impl Geocoder {
    pub fn from_config(config: &LocatorConfig) -> Result<Self, GeocodeError> {
        Ok(match config.geocoder {
            GeocoderKind::Offline => Self::Offline(OfflineResolver::new()),
            GeocoderKind::Nominatim => Self::Nominatim(NominatimResolver::new(config)?),
            GeocoderKind::None => Self::Disabled,
        })
    }
}

impl AddressResolver for Geocoder {
    async fn resolve(&self, latitude: f64, longitude: f64) -> Result<Option<String>, GeocodeError> {
        match self {
            Self::Offline(resolver) => resolver.resolve(latitude, longitude).await,
            Self::Nominatim(resolver) => resolver.resolve(latitude, longitude).await,
            Self::Disabled => Err(GeocodeError::Disabled),
        }
    }
}

/// Calls the resolver, giving up after `timeout`.
pub async fn lookup_address<R: AddressResolver>(
    resolver: &R,
    latitude: f64,
    longitude: f64,
    timeout: Duration,
) -> Result<Option<String>, GeocodeError> {
    tokio::time::timeout(timeout, resolver.resolve(latitude, longitude))
        .await
        .map_err(|_| GeocodeError::Timeout(timeout))?
}

/// Attaches an address to a record that has coordinates.
///
/// Resolver failures and timeouts are logged and leave the record with
/// coordinates only. Records without coordinates never reach the resolver.
pub async fn resolve_address<R: AddressResolver>(
    resolver: &R,
    metadata: CanonicalMetadata,
    timeout: Duration,
) -> CanonicalMetadata {
    let Ok((latitude, longitude)) = metadata.coordinates() else {
        return metadata;
    };
    match lookup_address(resolver, latitude, longitude, timeout).await {
        Ok(address) => metadata.with_address(address),
        Err(GeocodeError::Disabled) => metadata,
        Err(e) => {
            log::warn!("no address for ({latitude}, {longitude}): {e}");
            metadata
        }
    }
}
