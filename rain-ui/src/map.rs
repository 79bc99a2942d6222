use rain_core::map::{LOCATIONS, MAP_OPTIONS};
use tracing::debug;

use crate::ports::MapSurface;

/// Creates the map on `surface` and places one marker per known location,
/// each with a popup opened on click. Returns the markers in catalogue order.
pub fn init_map<S: MapSurface>(surface: &mut S) -> Vec<S::Marker> {
    surface.create_map(&MAP_OPTIONS);

    let markers: Vec<_> = LOCATIONS
        .iter()
        .map(|location| {
            let marker = surface.add_marker(location.position, location.title);
            surface.bind_info_window(&marker, location.info_html());
            marker
        })
        .collect();

    debug!(markers = markers.len(), "map initialized");
    markers
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rain_core::map::{LatLng, MapOptions};

    use super::*;

    #[derive(Default)]
    struct FakeSurface {
        options: Option<MapOptions>,
        markers: Vec<(LatLng, String)>,
        popups: Vec<(usize, String)>,
    }

    impl MapSurface for FakeSurface {
        type Marker = usize;

        fn create_map(&mut self, options: &MapOptions) {
            self.options = Some(*options);
        }

        fn add_marker(&mut self, position: LatLng, title: &str) -> usize {
            self.markers.push((position, title.to_string()));
            self.markers.len() - 1
        }

        fn bind_info_window(&mut self, marker: &usize, content: String) {
            self.popups.push((*marker, content));
        }
    }

    #[test]
    fn places_five_markers_with_popups() {
        let mut surface = FakeSurface::default();

        let markers = init_map(&mut surface);

        assert_eq!(markers, vec![0, 1, 2, 3, 4]);
        assert_eq!(surface.options, Some(MAP_OPTIONS));
        assert_eq!(surface.markers[0].1, "San Antonio Acahualco");
        assert_eq!(surface.popups.len(), 5);
        assert!(surface.popups[4].1.contains("<strong>Colonia Ricardo Flores Magón</strong>"));
    }
}
