//=========================================================================
// Camera
//=========================================================================
//
// 2D follow camera. `position` is the world coordinate of the viewport's
// top-left corner and always stays inside `bounds`.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::physics::Aabb;

//=== Camera ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub viewport: Vec2,
    pub bounds: Aabb,
    /// Fraction of the remaining distance covered per second. Zero snaps.
    pub lerp_speed: f32,
}

impl Camera {
    pub fn new(viewport: Vec2, bounds: Aabb, lerp_speed: f32) -> Self {
        let mut camera = Self { position: bounds.min, viewport, bounds, lerp_speed };
        camera.clamp_to_bounds();
        camera
    }

    //--- Movement ---------------------------------------------------------

    /// Eases the view centre toward `target`.
    pub fn follow(&mut self, target: Vec2, dt: f32) {
        let desired = target - self.viewport / 2.0;
        let t = if self.lerp_speed <= 0.0 {
            1.0
        } else {
            (self.lerp_speed * dt).min(1.0)
        };

        self.position += (desired - self.position) * t;
        self.clamp_to_bounds();
    }

    /// Centres on `target` immediately.
    pub fn snap_to(&mut self, target: Vec2) {
        self.position = target - self.viewport / 2.0;
        self.clamp_to_bounds();
    }

    fn clamp_to_bounds(&mut self) {
        // A world smaller than the viewport pins the camera to its origin.
        let max = (self.bounds.max - self.viewport).max(self.bounds.min);
        self.position = self.position.clamp(self.bounds.min, max);
    }

    //--- Conversion -------------------------------------------------------

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.position
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.position
    }

    //--- Visibility -------------------------------------------------------

    pub fn view_rect(&self) -> Aabb {
        Aabb::new(self.position, self.position + self.viewport)
    }

    /// True if `point` lies within the view grown by `margin` on each side.
    pub fn in_view(&self, point: Vec2, margin: f32) -> bool {
        let view = self.view_rect();
        point.x >= view.min.x - margin
            && point.x <= view.max.x + margin
            && point.y >= view.min.y - margin
            && point.y <= view.max.y + margin
    }

    pub fn aabb_in_view(&self, aabb: &Aabb) -> bool {
        self.view_rect().intersects(aabb)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(lerp_speed: f32) -> Camera {
        Camera::new(
            Vec2::new(800.0, 600.0),
            Aabb::new(Vec2::ZERO, Vec2::new(3000.0, 2000.0)),
            lerp_speed,
        )
    }

    //=====================================================================
    // Movement
    //=====================================================================

    #[test]
    fn snap_centres_target() {
        let mut cam = camera(5.0);
        cam.snap_to(Vec2::new(1500.0, 1000.0));
        assert_eq!(cam.position, Vec2::new(1100.0, 700.0));
    }

    #[test]
    fn snap_is_clamped_to_world() {
        let mut cam = camera(5.0);
        cam.snap_to(Vec2::new(10.0, 1990.0));
        assert_eq!(cam.position, Vec2::new(0.0, 1400.0));
    }

    #[test]
    fn follow_covers_lerp_fraction() {
        let mut cam = camera(5.0);
        cam.snap_to(Vec2::new(1000.0, 1000.0));

        cam.follow(Vec2::new(1100.0, 1000.0), 0.1);

        assert!((cam.position.x - 650.0).abs() < 1e-3);
        assert_eq!(cam.position.y, 700.0);
    }

    #[test]
    fn zero_lerp_speed_snaps() {
        let mut cam = camera(0.0);
        cam.follow(Vec2::new(1500.0, 1000.0), 1.0 / 60.0);
        assert_eq!(cam.position, Vec2::new(1100.0, 700.0));
    }

    #[test]
    fn large_step_does_not_overshoot() {
        let mut cam = camera(5.0);
        cam.follow(Vec2::new(1500.0, 1000.0), 10.0);
        assert_eq!(cam.position, Vec2::new(1100.0, 700.0));
    }

    //=====================================================================
    // Conversion & Visibility
    //=====================================================================

    #[test]
    fn screen_and_world_are_inverse() {
        let mut cam = camera(0.0);
        cam.snap_to(Vec2::new(1500.0, 1000.0));

        let world = Vec2::new(1234.0, 876.0);
        assert_eq!(cam.world_to_screen(world), Vec2::new(134.0, 176.0));
        assert_eq!(cam.screen_to_world(cam.world_to_screen(world)), world);
    }

    #[test]
    fn in_view_honours_margin() {
        let cam = camera(0.0);
        assert!(cam.in_view(Vec2::new(820.0, 10.0), 40.0));
        assert!(!cam.in_view(Vec2::new(860.0, 10.0), 40.0));
    }

    #[test]
    fn aabb_in_view_uses_overlap() {
        let cam = camera(0.0);
        let visible = Aabb::new(Vec2::new(780.0, 0.0), Vec2::new(820.0, 40.0));
        let hidden = Aabb::new(Vec2::new(800.0, 0.0), Vec2::new(840.0, 40.0));

        assert!(cam.aabb_in_view(&visible));
        assert!(!cam.aabb_in_view(&hidden));
    }
}
