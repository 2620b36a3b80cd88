//! The restaurant interior, composed draw by draw every frame.
//!
//! Every routine here is a pure function of the canvas and its placement
//! parameters: it builds a model matrix with [`Transform`], writes `model`
//! and a flat material, and draws one of the shared meshes.

use glam::Vec3;

use crate::frame::Canvas;
use crate::light::LightRig;
use crate::mesh::MeshKind;
use crate::transform::Transform;

/// Centers of the four dining tables.
pub const TABLE_POSITIONS: [Vec3; 4] = [
    Vec3::new(-3.0, 0.5, -3.0),
    Vec3::new(3.0, 0.5, -3.0),
    Vec3::new(-3.0, 0.5, 3.0),
    Vec3::new(3.0, 0.5, 3.0),
];

/// Distance from a table center to each of its chairs.
pub const CHAIR_DISTANCE: f32 = 1.6;

/// Chair offsets from the table center with the Y rotation that makes each
/// chair face the table.
pub const CHAIR_PLACEMENTS: [(Vec3, f32); 4] = [
    (Vec3::new(CHAIR_DISTANCE, 0.0, 0.0), -90.0),
    (Vec3::new(-CHAIR_DISTANCE, 0.0, 0.0), 90.0),
    (Vec3::new(0.0, 0.0, CHAIR_DISTANCE), 180.0),
    (Vec3::new(0.0, 0.0, -CHAIR_DISTANCE), 0.0),
];

/// Where the pendant light hangs; matches the blue point light.
pub const PENDANT_ANCHOR: Vec3 = Vec3::new(0.0, 4.0, 3.0);

const WOOD: Vec3 = Vec3::new(0.4, 0.2, 0.1);

/// Flat Phong material uploaded per draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Material {
    /// Same color for ambient and diffuse with a mild highlight.
    pub fn flat(color: Vec3) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            specular: Vec3::splat(0.5),
            shininess: 32.0,
        }
    }

    /// Bright highlight for the light-source markers.
    pub fn glowing(color: Vec3) -> Self {
        Self {
            specular: Vec3::ONE,
            ..Self::flat(color)
        }
    }

    pub fn upload(&self, canvas: &mut impl Canvas) {
        canvas.set_vec3("material.ambient", self.ambient);
        canvas.set_vec3("material.diffuse", self.diffuse);
        canvas.set_vec3("material.specular", self.specular);
        canvas.set_float("material.shininess", self.shininess);
    }
}

/// Ceiling fan blade animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CeilingFan {
    angle: f32,
    running: bool,
    speed: f32,
}

impl CeilingFan {
    /// Blade speed in degrees per second.
    pub const DEFAULT_SPEED: f32 = 700.0;

    pub fn new(speed: f32) -> Self {
        Self {
            angle: 0.0,
            running: false,
            speed,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Blade angle in degrees, always in `[0, 360)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn advance(&mut self, delta_time: f32) {
        if self.running {
            self.angle = wrap_degrees(self.angle + self.speed * delta_time);
        }
    }
}

impl Default for CeilingFan {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SPEED)
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds up to 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Uploads `model` plus `material` and draws `mesh` once.
pub fn draw_primitive(
    canvas: &mut impl Canvas,
    mesh: MeshKind,
    model: Transform,
    material: &Material,
) {
    material.upload(canvas);
    canvas.set_mat4("model", model.matrix());
    canvas.draw_mesh(mesh);
}

pub fn draw_cube(canvas: &mut impl Canvas, model: Transform, color: Vec3) {
    draw_primitive(canvas, MeshKind::Cube, model, &Material::flat(color));
}

/// Draws the whole interior for one frame.
pub fn compose_restaurant(canvas: &mut impl Canvas, lights: &LightRig, fan_angle: f32) {
    draw_floor(canvas);
    draw_walls(canvas);
    for light in &lights.points {
        let marker = light.colors().diffuse.clamp(Vec3::ZERO, Vec3::ONE);
        draw_light_source(canvas, light.position, marker);
    }
    draw_pendant_light(canvas);
    for table in TABLE_POSITIONS {
        draw_table(canvas, table);
        for (offset, facing) in CHAIR_PLACEMENTS {
            draw_chair(canvas, table + offset, facing);
        }
        draw_table_settings(canvas, table);
    }
    draw_wall_art(canvas);
    draw_shelf(canvas);
    draw_windows(canvas);
    draw_ceiling_fan(canvas, fan_angle);
}

pub fn draw_floor(canvas: &mut impl Canvas) {
    let model = Transform::new().scale(Vec3::new(10.0, 0.1, 10.0));
    draw_cube(canvas, model, Vec3::splat(0.5));
}

/// Left, right and back walls plus the ceiling. The front stays open.
pub fn draw_walls(canvas: &mut impl Canvas) {
    let material = Material::flat(Vec3::splat(0.9));
    let panels = [
        (Vec3::new(-5.0, 2.5, 0.0), Vec3::new(0.1, 5.0, 10.0)),
        (Vec3::new(5.0, 2.5, 0.0), Vec3::new(0.1, 5.0, 10.0)),
        (Vec3::new(0.0, 2.5, -5.0), Vec3::new(10.0, 5.0, 0.1)),
        (Vec3::new(0.0, 5.0, 0.0), Vec3::new(10.0, 0.1, 10.0)),
    ];
    for (center, size) in panels {
        draw_primitive(
            canvas,
            MeshKind::Cube,
            Transform::at(center).scale(size),
            &material,
        );
    }
}

/// Small cube marking where a light sits.
pub fn draw_light_source(canvas: &mut impl Canvas, position: Vec3, color: Vec3) {
    let model = Transform::at(position).scale_uniform(0.3);
    draw_primitive(canvas, MeshKind::Cube, model, &Material::glowing(color));
}

pub fn draw_ceiling_fan(canvas: &mut impl Canvas, blade_angle: f32) {
    let rod = Transform::at(Vec3::new(0.0, 4.8, 0.0)).scale(Vec3::new(0.2, 0.6, 0.2));
    draw_cube(canvas, rod, Vec3::new(0.5, 0.2, 0.8));

    let motor = Transform::at(Vec3::new(0.0, 4.5, 0.0)).scale(Vec3::new(0.5, 0.2, 0.5));
    draw_cube(canvas, motor, Vec3::ONE);

    // Blades hang off the motor housing and inherit its scale.
    for i in 0..4 {
        let blade = motor
            .translate(Vec3::new(0.0, -0.1, 0.0))
            .rotate_y(blade_angle + 90.0 * i as f32)
            .translate(Vec3::new(0.0, 0.0, 1.0))
            .scale(Vec3::new(0.5, 0.2, 5.0));
        draw_cube(canvas, blade, Vec3::new(0.8, 0.2, 0.2));
    }
}

/// Tabletop and four legs.
pub fn draw_table(canvas: &mut impl Canvas, position: Vec3) {
    let top = Transform::at(position).scale(Vec3::new(2.0, 0.1, 2.0));
    draw_cube(canvas, top, Vec3::new(0.6, 0.3, 0.1));

    for (x, z) in [(-0.84, -0.84), (0.84, -0.84), (-0.84, 0.84), (0.84, 0.84)] {
        let leg = Transform::at(position + Vec3::new(x, -0.28, z)).scale(Vec3::new(0.1, 0.6, 0.1));
        draw_cube(canvas, leg, Vec3::new(0.5, 0.2, 0.1));
    }
}

/// Seat, four legs and a backrest, rotated by `facing` degrees around Y.
pub fn draw_chair(canvas: &mut impl Canvas, position: Vec3, facing: f32) {
    let base = Transform::at(position).rotate_y(facing);

    let seat = base
        .translate(Vec3::new(0.0, -0.15, 0.0))
        .scale(Vec3::new(0.5, 0.1, 0.5));
    draw_cube(canvas, seat, WOOD);

    for (x, z) in [(-0.2, -0.2), (0.2, -0.2), (-0.2, 0.2), (0.2, 0.2)] {
        let leg = base
            .translate(Vec3::new(x, -0.25, z))
            .scale(Vec3::new(0.05, 0.25, 0.05));
        draw_cube(canvas, leg, WOOD);
    }

    let backrest = base
        .translate(Vec3::new(0.0, 0.2, -0.3))
        .scale(Vec3::new(0.5, 0.6, 0.1));
    draw_cube(canvas, backrest, WOOD);
}

/// Plate, glass and napkin resting on the tabletop.
pub fn draw_table_settings(canvas: &mut impl Canvas, table: Vec3) {
    let plate = Transform::at(table + Vec3::new(0.3, 0.05, 0.3)).scale(Vec3::new(0.3, 0.02, 0.3));
    draw_cube(canvas, plate, Vec3::splat(0.9));

    let glass = Transform::at(table + Vec3::new(-0.3, 0.1, 0.3)).scale(Vec3::new(0.1, 0.2, 0.1));
    draw_cube(canvas, glass, Vec3::new(0.8, 0.8, 1.0));

    let napkin = Transform::at(table + Vec3::new(0.0, 0.05, -0.3)).scale(Vec3::new(0.2, 0.01, 0.2));
    draw_cube(canvas, napkin, Vec3::ONE);
}

/// Painting on the left wall.
pub fn draw_wall_art(canvas: &mut impl Canvas) {
    let model = Transform::at(Vec3::new(-4.9, 2.5, -2.0)).scale(Vec3::new(0.1, 1.5, 2.0));
    draw_cube(canvas, model, Vec3::new(0.7, 0.2, 0.2));
}

/// Wall shelf with a single book.
pub fn draw_shelf(canvas: &mut impl Canvas) {
    let shelf = Transform::at(Vec3::new(-4.9, 1.5, 1.0)).scale(Vec3::new(0.1, 0.2, 2.0));
    draw_cube(canvas, shelf, WOOD);

    let book = Transform::at(Vec3::new(-4.7, 1.6, 1.0)).scale(Vec3::new(0.1, 0.4, 0.2));
    draw_cube(canvas, book, Vec3::new(0.1, 0.1, 0.8));
}

/// Pendant lamp: shade, bulb, ring, chain up to a ceiling plate, and a glow
/// marker at the bulb.
pub fn draw_pendant_light(canvas: &mut impl Canvas) {
    let at = |y: f32| Transform::at(Vec3::new(PENDANT_ANCHOR.x, y, PENDANT_ANCHOR.z));

    draw_cube(
        canvas,
        at(4.0).scale(Vec3::new(0.4, 0.6, 0.4)),
        Vec3::new(0.2, 0.2, 0.8),
    );
    draw_cube(
        canvas,
        at(3.7).scale(Vec3::new(0.3, 0.4, 0.3)),
        Vec3::new(0.3, 0.7, 1.0),
    );
    draw_cube(
        canvas,
        at(4.2).scale(Vec3::new(0.5, 0.05, 0.5)),
        Vec3::new(0.4, 0.4, 1.0),
    );

    let gold = Material::flat(Vec3::new(0.8, 0.6, 0.3));
    let (top, bottom, spacing) = (4.8_f32, PENDANT_ANCHOR.y, 0.2_f32);
    let links = ((top - bottom) / spacing).round() as u32;
    for i in 0..=links {
        let y = top - i as f32 * spacing;
        draw_primitive(canvas, MeshKind::Sphere, at(y).scale_uniform(0.08), &gold);
        if i < links {
            let rod = at(y - spacing / 2.0).scale(Vec3::new(0.05, spacing / 2.0, 0.05));
            draw_primitive(canvas, MeshKind::Cube, rod, &gold);
        }
    }

    draw_cube(
        canvas,
        at(top + 0.05).scale(Vec3::new(0.3, 0.05, 0.3)),
        Vec3::splat(0.6),
    );

    draw_light_source(
        canvas,
        Vec3::new(PENDANT_ANCHOR.x, 3.7, PENDANT_ANCHOR.z),
        Vec3::new(0.0, 0.5, 1.0),
    );
}

/// Window on the right wall framed by two curtains.
pub fn draw_windows(canvas: &mut impl Canvas) {
    let glass = Transform::at(Vec3::new(4.9, 3.0, 0.0)).scale(Vec3::new(0.1, 1.5, 2.0));
    draw_cube(canvas, glass, Vec3::new(0.8, 0.8, 1.0));

    for z in [-1.0, 1.0] {
        let curtain = Transform::at(Vec3::new(4.8, 3.0, z)).scale(Vec3::new(0.1, 1.5, 0.5));
        draw_cube(canvas, curtain, Vec3::new(0.7, 0.3, 0.3));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameRecorder;

    fn record(draw: impl FnOnce(&mut FrameRecorder)) -> FrameRecorder {
        let mut frame = FrameRecorder::new();
        draw(&mut frame);
        frame
    }

    #[test]
    fn table_is_top_plus_four_legs() {
        let frame = record(|f| draw_table(f, TABLE_POSITIONS[0]));
        assert_eq!(frame.draws().len(), 5);
        assert_eq!(frame.draws()[0].origin(), TABLE_POSITIONS[0]);
        for leg in &frame.draws()[1..] {
            let offset = leg.origin() - TABLE_POSITIONS[0];
            assert!((offset.x.abs() - 0.84).abs() < 1e-5);
            assert!((offset.z.abs() - 0.84).abs() < 1e-5);
        }
    }

    #[test]
    fn chair_backrest_turns_away_from_table() {
        let table = TABLE_POSITIONS[3];
        for (offset, facing) in CHAIR_PLACEMENTS {
            let chair = table + offset;
            let frame = record(|f| draw_chair(f, chair, facing));
            assert_eq!(frame.draws().len(), 6);
            let backrest = frame.draws()[5].origin();
            let to_table = (table - chair).normalize();
            let to_backrest = Vec3::new(backrest.x - chair.x, 0.0, backrest.z - chair.z).normalize();
            assert!(to_table.dot(to_backrest) < -0.99, "facing {facing}");
        }
    }

    #[test]
    fn pendant_chain_alternates_spheres_and_rods() {
        let frame = record(|f| draw_pendant_light(f));
        assert_eq!(frame.draw_count(MeshKind::Sphere), 5);
        let chain: Vec<_> = frame.draws()[3..12].iter().map(|d| d.mesh).collect();
        for (i, mesh) in chain.iter().enumerate() {
            let expected = if i % 2 == 0 { MeshKind::Sphere } else { MeshKind::Cube };
            assert_eq!(*mesh, expected);
        }
        let lowest = frame.draws()[11].origin();
        assert!((lowest.y - PENDANT_ANCHOR.y).abs() < 1e-5);
    }

    #[test]
    fn fan_blades_follow_angle() {
        let still = record(|f| draw_ceiling_fan(f, 0.0));
        let turned = record(|f| draw_ceiling_fan(f, 90.0));
        assert_eq!(still.draws().len(), 6);
        // a quarter turn maps blade i onto blade i + 1
        for i in 2..5 {
            let a = turned.draws()[i].origin();
            let b = still.draws()[i + 1].origin();
            assert!((a - b).length() < 1e-4);
        }
    }

    #[test]
    fn walls_share_the_default_cube_material() {
        let frame = record(|f| draw_walls(f));
        assert_eq!(frame.draws().len(), 4);
        for draw in frame.draws() {
            assert_eq!(draw.object.specular, [0.5, 0.5, 0.5, 32.0]);
            assert_eq!(draw.diffuse(), Vec3::splat(0.9));
        }
    }

    #[test]
    fn restaurant_draws_every_object_once() {
        let rig = LightRig::restaurant();
        let frame = record(|f| compose_restaurant(f, &rig, 0.0));
        // floor 1, walls 4, markers 3, pendant 14, tables 4 x 32,
        // art 1, shelf 2, window 3, fan 6
        assert_eq!(frame.draws().len(), 162);
        assert_eq!(frame.draw_count(MeshKind::Sphere), 5);
        let markers = &frame.draws()[5..8];
        assert_eq!(markers[2].diffuse(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(markers[0].origin(), Vec3::new(4.0, 5.0, -4.0));
    }

    #[test]
    fn fan_angle_stays_in_range_and_keeps_direction() {
        let mut fan = CeilingFan::default();
        fan.start();
        let dt = 1.0 / 60.0;
        let step = CeilingFan::DEFAULT_SPEED * dt;
        let mut previous = fan.angle();
        for _ in 0..600 {
            fan.advance(dt);
            let angle = fan.angle();
            assert!((0.0..360.0).contains(&angle));
            let moved = (angle - previous).rem_euclid(360.0);
            assert!((moved - step).abs() < 1e-2, "moved {moved}");
            previous = angle;
        }
    }

    #[test]
    fn stopped_fan_holds_angle() {
        let mut fan = CeilingFan::default();
        fan.start();
        fan.advance(0.1);
        fan.stop();
        let held = fan.angle();
        fan.advance(5.0);
        assert_eq!(fan.angle(), held);
        assert!((held - 70.0).abs() < 1e-3);
    }
}
