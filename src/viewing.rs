use crate::settings::Settings;

/// Maps pixel positions on the rendered maze to viewing angles for an observer looking
/// at the physical display plane from `distance_cm` away, centred on the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingGeometry {
    px_per_cm_x: f32,
    px_per_cm_y: f32,
    centre_x_px: f32,
    centre_y_px: f32,
    distance_cm: f32,
}

impl ViewingGeometry {
    /// None unless every measurement is positive.
    pub fn new(surface_width_px: f32,
               surface_height_px: f32,
               plane_width_cm: f32,
               plane_height_cm: f32,
               distance_cm: f32)
               -> Option<ViewingGeometry> {
        let all_positive = [surface_width_px, surface_height_px, plane_width_cm, plane_height_cm, distance_cm]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !all_positive {
            return None;
        }

        Some(ViewingGeometry {
            px_per_cm_x: surface_width_px / plane_width_cm,
            px_per_cm_y: surface_height_px / plane_height_cm,
            centre_x_px: surface_width_px / 2.0,
            centre_y_px: surface_height_px / 2.0,
            distance_cm,
        })
    }

    /// Viewing geometry for a rendered surface of the given pixel size, with the plane
    /// measurements from the settings. None when the settings leave any of them out.
    ///
    /// The surface is the maze actually being shown, a loaded maze can differ in size
    /// from the one the settings describe.
    pub fn for_surface(surface_width_px: f32,
                       surface_height_px: f32,
                       settings: &Settings)
                       -> Option<ViewingGeometry> {
        match (settings.plane_width_cm, settings.plane_height_cm, settings.distance_cm) {
            (Some(plane_width), Some(plane_height), Some(distance)) => {
                ViewingGeometry::new(surface_width_px, surface_height_px, plane_width, plane_height, distance)
            }
            _ => None,
        }
    }

    /// Horizontal and vertical angles in degrees from the centre of the plane to a pixel.
    /// Up on the screen is a positive vertical angle.
    pub fn ray_angles(&self, x_px: f32, y_px: f32) -> (f32, f32) {
        let dx_cm = (x_px - self.centre_x_px) / self.px_per_cm_x;
        let dy_cm = -(y_px - self.centre_y_px) / self.px_per_cm_y;

        (dx_cm.atan2(self.distance_cm).to_degrees(), dy_cm.atan2(self.distance_cm).to_degrees())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn centre_is_straight_ahead() {
        let v = ViewingGeometry::new(800.0, 600.0, 40.0, 30.0, 50.0).unwrap();
        let (ax, ay) = v.ray_angles(400.0, 300.0);
        assert!(close(ax, 0.0) && close(ay, 0.0));
    }

    #[test]
    fn forty_five_degrees() {
        // 20 px per cm on both axes, observer 10 cm away.
        let v = ViewingGeometry::new(800.0, 600.0, 40.0, 30.0, 10.0).unwrap();
        let (ax, ay) = v.ray_angles(600.0, 300.0);
        assert!(close(ax, 45.0), "{}", ax);
        assert!(close(ay, 0.0));

        // Below the centre on screen is a downward angle.
        let (ax, ay) = v.ray_angles(400.0, 500.0);
        assert!(close(ax, 0.0));
        assert!(close(ay, -45.0), "{}", ay);
    }

    #[test]
    fn rejects_degenerate_measurements() {
        assert!(ViewingGeometry::new(800.0, 600.0, 0.0, 30.0, 10.0).is_none());
        assert!(ViewingGeometry::new(800.0, 600.0, 40.0, 30.0, -1.0).is_none());
        assert!(ViewingGeometry::new(std::f32::NAN, 600.0, 40.0, 30.0, 1.0).is_none());
    }

    #[test]
    fn for_surface_needs_all_measurements() {
        let mut settings = Settings {
            maze_width: 20,
            maze_height: 10,
            cell_size: 40,
            player_speed: 1.0,
            const_maze: false,
            plane_width_cm: Some(80.0),
            plane_height_cm: Some(40.0),
            distance_cm: Some(60.0),
            seed: None,
        };
        let v = ViewingGeometry::for_surface(800.0, 400.0, &settings).unwrap();
        let (ax, ay) = v.ray_angles(400.0, 200.0);
        assert!(close(ax, 0.0) && close(ay, 0.0));

        settings.distance_cm = None;
        assert!(ViewingGeometry::for_surface(800.0, 400.0, &settings).is_none());
    }

    #[test]
    fn surface_size_wins_over_maze_settings() {
        // Settings describe a 20x10 maze of 40 px cells, the surface shows 5x5 of them.
        let settings = Settings {
            maze_width: 20,
            maze_height: 10,
            cell_size: 40,
            player_speed: 1.0,
            const_maze: true,
            plane_width_cm: Some(20.0),
            plane_height_cm: Some(20.0),
            distance_cm: Some(10.0),
            seed: None,
        };
        let v = ViewingGeometry::for_surface(200.0, 200.0, &settings).unwrap();
        let (ax, ay) = v.ray_angles(100.0, 100.0);
        assert!(close(ax, 0.0) && close(ay, 0.0));
        // 10 px per cm, so 100 px right of centre is 10 cm at 10 cm distance.
        let (ax, _) = v.ray_angles(200.0, 100.0);
        assert!(close(ax, 45.0), "{}", ax);
    }
}
