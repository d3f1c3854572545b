//! Animated wind/precipitation map overlay
//!
//! Pure geometry: given city coordinates and wind readings, produce per
//! animation frame an arrow shaft and a triangular fold-back arrowhead per
//! city, plus precipitation markers, for a generic map/charting frontend.
//! Output is deterministic for a given frame index.

use serde::{Deserialize, Serialize};

use crate::models::{CityRecord, Coord, WeatherSnapshot, WindReading};

/// Israel map boundaries (approximate); all emitted coordinates are clamped
/// into this box.
pub const ISRAEL_BOUNDS: MapBounds = MapBounds {
    lat_min: 29.5,
    lat_max: 33.3,
    lon_min: 34.2,
    lon_max: 35.9,
};

/// Map view the frontend centers on
pub const MAP_CENTER: Coord = Coord {
    latitude: 31.4,
    longitude: 35.0,
};
pub const MAP_ZOOM: u8 = 6;

/// Animation defaults: 8 frames at 100 ms for smooth playback
pub const FRAME_COUNT: usize = 8;
pub const FRAME_DURATION_MS: u32 = 100;

// Arrow shape constants: shaft length is speed/50 scaled by 0.1 degrees,
// the head folds back at +-150 degrees at a quarter of the shaft length.
const SPEED_NORMALIZER: f64 = 50.0;
const SHAFT_SCALE: f64 = 0.1;
const HEAD_SPREAD_DEG: f64 = 150.0;
const HEAD_LENGTH_RATIO: f64 = 0.25;
const JITTER_AMPLITUDE_DEG: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl MapBounds {
    fn clamp(&self, coord: Coord) -> Coord {
        Coord {
            latitude: coord.latitude.clamp(self.lat_min, self.lat_max),
            longitude: coord.longitude.clamp(self.lon_min, self.lon_max),
        }
    }
}

/// One city's input to the overlay renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayCity {
    pub name: String,
    pub hebrew_name: String,
    pub coord: Coord,
    /// Cities without a wind reading get a marker but no arrow
    pub wind: Option<WindReading>,
    pub precipitation_mm: Option<f32>,
}

impl OverlayCity {
    /// Marker-only entry from the reference table
    #[must_use]
    pub fn from_record(record: &CityRecord) -> Self {
        Self {
            name: record.name.clone(),
            hebrew_name: record.hebrew_name.clone(),
            coord: Coord {
                latitude: record.latitude,
                longitude: record.longitude,
            },
            wind: None,
            precipitation_mm: None,
        }
    }

    /// Attach wind and precipitation from a current-weather snapshot
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: &WeatherSnapshot) -> Self {
        self.wind = snapshot.wind.clone();
        self.precipitation_mm = snapshot.precipitation_mm;
        self
    }
}

/// City marker on the base map layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityMarker {
    pub name: String,
    pub hebrew_name: String,
    pub coord: Coord,
}

/// Precipitation marker drawn atop a city location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecipitationMarker {
    pub city: String,
    pub coord: Coord,
    pub amount_mm: f32,
}

/// One wind arrow: a shaft segment plus a triangular arrowhead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindArrow {
    pub city: String,
    /// Shaft from the city coordinate to the arrow tip
    pub shaft: [Coord; 2],
    /// Arrowhead triangle: left fold-back point, tip, right fold-back point
    pub head: [Coord; 3],
    pub speed: f32,
    pub direction_deg: u16,
    pub cardinal: String,
}

/// Arrows for one animation frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayFrame {
    pub name: String,
    pub arrows: Vec<WindArrow>,
}

/// The complete renderable overlay figure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayFigure {
    pub bounds: MapBounds,
    pub center: Coord,
    pub zoom: u8,
    pub frame_duration_ms: u32,
    pub markers: Vec<CityMarker>,
    pub precipitation: Vec<PrecipitationMarker>,
    pub frames: Vec<OverlayFrame>,
}

/// Render the overlay figure. Cities with wind data get one arrow per
/// frame; cities without are markers only and are skipped silently.
#[must_use]
pub fn render_overlay(cities: &[OverlayCity], frames: usize) -> OverlayFigure {
    let markers = cities
        .iter()
        .map(|c| CityMarker {
            name: c.name.clone(),
            hebrew_name: c.hebrew_name.clone(),
            coord: ISRAEL_BOUNDS.clamp(c.coord),
        })
        .collect();

    let precipitation = cities
        .iter()
        .filter_map(|c| {
            let amount_mm = c.precipitation_mm.filter(|mm| *mm > 0.0)?;
            Some(PrecipitationMarker {
                city: c.name.clone(),
                coord: ISRAEL_BOUNDS.clamp(c.coord),
                amount_mm,
            })
        })
        .collect();

    let frames = (0..frames)
        .map(|frame| OverlayFrame {
            name: format!("frame{frame}"),
            arrows: cities
                .iter()
                .filter_map(|c| wind_arrow(c, frame))
                .collect(),
        })
        .collect();

    OverlayFigure {
        bounds: ISRAEL_BOUNDS,
        center: MAP_CENTER,
        zoom: MAP_ZOOM,
        frame_duration_ms: FRAME_DURATION_MS,
        markers,
        precipitation,
        frames,
    }
}

/// Compute one city's arrow for a frame. Returns `None` when the city has
/// no wind reading.
#[must_use]
pub fn wind_arrow(city: &OverlayCity, frame: usize) -> Option<WindArrow> {
    let wind = city.wind.as_ref()?;

    // Meteorological degrees taken as a planar angle, perturbed slightly
    // per frame to suggest flow. Frame 0 is unperturbed.
    let jitter = JITTER_AMPLITUDE_DEG * (frame as f64 * std::f64::consts::FRAC_PI_4).sin();
    let angle = (f64::from(wind.direction_deg) + jitter).to_radians();

    let shaft_len = f64::from(wind.speed) / SPEED_NORMALIZER * SHAFT_SCALE;
    let tip = Coord {
        latitude: city.coord.latitude + shaft_len * angle.sin(),
        longitude: city.coord.longitude + shaft_len * angle.cos(),
    };

    let head_len = shaft_len * HEAD_LENGTH_RATIO;
    let left_angle = angle + HEAD_SPREAD_DEG.to_radians();
    let right_angle = angle - HEAD_SPREAD_DEG.to_radians();
    let left = Coord {
        latitude: tip.latitude + head_len * left_angle.sin(),
        longitude: tip.longitude + head_len * left_angle.cos(),
    };
    let right = Coord {
        latitude: tip.latitude + head_len * right_angle.sin(),
        longitude: tip.longitude + head_len * right_angle.cos(),
    };

    let origin = ISRAEL_BOUNDS.clamp(city.coord);
    let tip = ISRAEL_BOUNDS.clamp(tip);
    Some(WindArrow {
        city: city.name.clone(),
        shaft: [origin, tip],
        head: [ISRAEL_BOUNDS.clamp(left), tip, ISRAEL_BOUNDS.clamp(right)],
        speed: wind.speed,
        direction_deg: wind.direction_deg,
        cardinal: wind.cardinal.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city_with_wind(speed: f32, direction_deg: u16) -> OverlayCity {
        OverlayCity {
            name: "Tel Aviv".to_string(),
            hebrew_name: "תל אביב".to_string(),
            coord: Coord {
                latitude: 32.0853,
                longitude: 34.7818,
            },
            wind: Some(WindReading::new(speed, direction_deg)),
            precipitation_mm: None,
        }
    }

    #[test]
    fn test_arrow_is_deterministic_per_frame() {
        let city = city_with_wind(5.0, 270);
        let a = wind_arrow(&city, 3).unwrap();
        let b = wind_arrow(&city, 3).unwrap();
        assert_eq!(a.shaft, b.shaft);
        assert_eq!(a.head, b.head);
    }

    #[test]
    fn test_frame_zero_matches_raw_geometry() {
        // At frame 0 the jitter term vanishes: angle is exactly the
        // meteorological direction in radians.
        let city = city_with_wind(5.0, 90);
        let arrow = wind_arrow(&city, 0).unwrap();

        let shaft_len = 5.0_f64 / 50.0 * 0.1;
        let angle = 90.0_f64.to_radians();
        let expected_lat = city.coord.latitude + shaft_len * angle.sin();
        let expected_lon = city.coord.longitude + shaft_len * angle.cos();
        assert!((arrow.shaft[1].latitude - expected_lat).abs() < 1e-12);
        assert!((arrow.shaft[1].longitude - expected_lon).abs() < 1e-12);
    }

    #[test]
    fn test_frames_perturb_the_angle() {
        let city = city_with_wind(8.0, 45);
        let frame0 = wind_arrow(&city, 0).unwrap();
        let frame1 = wind_arrow(&city, 1).unwrap();
        assert_ne!(frame0.shaft[1], frame1.shaft[1]);
    }

    #[test]
    fn test_arrowhead_folds_back_toward_origin() {
        let city = city_with_wind(10.0, 90);
        let arrow = wind_arrow(&city, 0).unwrap();
        let [origin, tip] = arrow.shaft;
        let [left, head_tip, right] = arrow.head;

        assert_eq!(tip, head_tip);
        // Fold-back points sit between origin and tip along the shaft axis.
        for p in [left, right] {
            let to_origin = (p.latitude - origin.latitude).abs();
            let shaft = (tip.latitude - origin.latitude).abs();
            assert!(to_origin < shaft);
        }
    }

    #[test]
    fn test_city_without_wind_is_skipped() {
        let mut city = city_with_wind(5.0, 180);
        city.wind = None;
        assert!(wind_arrow(&city, 0).is_none());

        let figure = render_overlay(&[city], FRAME_COUNT);
        assert_eq!(figure.frames.len(), FRAME_COUNT);
        assert!(figure.frames.iter().all(|f| f.arrows.is_empty()));
        // Still present as a base-map marker.
        assert_eq!(figure.markers.len(), 1);
    }

    #[test]
    fn test_coordinates_clamped_to_israel_bounds() {
        // A city on the northern border blowing north would overshoot.
        let city = OverlayCity {
            name: "Metula".to_string(),
            hebrew_name: "מטולה".to_string(),
            coord: Coord {
                latitude: 33.28,
                longitude: 35.57,
            },
            wind: Some(WindReading::new(10.0, 90)),
            precipitation_mm: None,
        };
        let figure = render_overlay(&[city], FRAME_COUNT);
        for frame in &figure.frames {
            for arrow in &frame.arrows {
                for coord in arrow.shaft.iter().chain(arrow.head.iter()) {
                    assert!(coord.latitude <= ISRAEL_BOUNDS.lat_max);
                    assert!(coord.latitude >= ISRAEL_BOUNDS.lat_min);
                    assert!(coord.longitude <= ISRAEL_BOUNDS.lon_max);
                    assert!(coord.longitude >= ISRAEL_BOUNDS.lon_min);
                }
            }
        }
    }

    #[test]
    fn test_precipitation_markers() {
        let mut rainy = city_with_wind(5.0, 200);
        rainy.precipitation_mm = Some(2.5);
        let dry = city_with_wind(5.0, 200);

        let figure = render_overlay(&[rainy, dry], 1);
        assert_eq!(figure.precipitation.len(), 1);
        assert_eq!(figure.precipitation[0].amount_mm, 2.5);
    }
}
