use serde::{Deserialize, Serialize};

/// A map point. The backend spells longitude `lang`; the browser and OSRM say `lng`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    #[serde(rename = "lang", alias = "lng")]
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }

    /// Raw coordinates shown when no address could be resolved.
    pub fn fallback_label(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }

    /// `lng,lat` as OSRM expects in its path.
    pub fn osrm_pair(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }

    /// Builds a point from optional query fields; both must be present and in range.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        Self::new(lat?, lng?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_label_uses_four_decimals() {
        let dhaka = LatLng::new(23.810332, 90.4125181).unwrap();
        assert_eq!(dhaka.fallback_label(), "23.8103, 90.4125");
    }

    #[test]
    fn out_of_range_points_are_rejected() {
        assert!(LatLng::new(91.0, 0.0).is_none());
        assert!(LatLng::new(0.0, -181.0).is_none());
        assert!(LatLng::new(f64::NAN, 0.0).is_none());
        assert!(LatLng::from_parts(Some(1.0), None).is_none());
    }

    #[test]
    fn osrm_pair_is_longitude_first() {
        let p = LatLng::new(23.5, 90.25).unwrap();
        assert_eq!(p.osrm_pair(), "90.25,23.5");
    }

    #[test]
    fn wire_format_uses_lang_but_accepts_lng() {
        let p = LatLng { lat: 1.5, lng: 2.5 };
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"lat":1.5,"lang":2.5}"#);
        let q: LatLng = serde_json::from_str(r#"{"lat":1.5,"lng":2.5}"#).unwrap();
        assert_eq!(q, p);
    }
}
