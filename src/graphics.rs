use crate::math::{apply_lighting, calculate_light_intensity, edge_function, Vec3};
use crate::mesh::{self, BACKGROUND_INDICES};
use crate::state::Frame;
use crate::vertex::{BackgroundVertex, Vertex};

/// Background checker colors, even and odd tiles
const TILE_COLORS: [[u8; 3]; 2] = [[36, 38, 46], [52, 55, 66]];

const EDGE_COLOR: [u8; 3] = [255, 255, 255];

/// How the cube is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Solid,
    Wireframe,
}

/// Color and depth buffer, row 0 at the top
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    color: Vec<[u8; 3]>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            color: vec![[0; 3]; width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    /// Reallocates if the size changed, then resets depth
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.width, self.height) {
            *self = Framebuffer::new(width, height);
        } else {
            self.depth.fill(f32::INFINITY);
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.color[y * self.width + x]
    }

    pub fn depth(&self, x: usize, y: usize) -> f32 {
        self.depth[y * self.width + x]
    }
}

/// A vertex after projection to the screen
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    screen_position: [f32; 2],
    depth: f32,
    color: [f32; 3],
}

/// Fills the framebuffer from the tiled background quad, resetting depth.
///
/// Each tile alternates between two colors by the parity of its integer
/// texture coordinates.
pub fn draw_background(fb: &mut Framebuffer) {
    fb.depth.fill(f32::INFINITY);
    let quad = mesh::background(fb.width as u32, fb.height as u32);

    for triangle in BACKGROUND_INDICES.chunks(3) {
        let [a, b, c] = [0, 1, 2].map(|i| quad[triangle[i] as usize]);
        fill_background_triangle(fb, &a, &b, &c);
    }
}

fn fill_background_triangle(
    fb: &mut Framebuffer,
    v0: &BackgroundVertex,
    v1: &BackgroundVertex,
    v2: &BackgroundVertex,
) {
    let (width, height) = (fb.width as f32, fb.height as f32);
    let to_screen = |v: &BackgroundVertex| [(v.x + 1.0) / 2.0 * width, (1.0 - v.y) / 2.0 * height];
    let (p0, p1, p2) = (to_screen(v0), to_screen(v1), to_screen(v2));

    let area = edge_function(&p0, &p1, &p2);
    if area == 0.0 {
        return;
    }

    for y in 0..fb.height {
        for x in 0..fb.width {
            let p = [x as f32 + 0.5, y as f32 + 0.5];
            let w0 = edge_function(&p1, &p2, &p) / area;
            let w1 = edge_function(&p2, &p0, &p) / area;
            let w2 = edge_function(&p0, &p1, &p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let u = v0.u * w0 + v1.u * w1 + v2.u * w2;
            let v = v0.v * w0 + v1.v * w1 + v2.v * w2;
            let parity = (u.floor() as i64 + v.floor() as i64).rem_euclid(2) as usize;
            fb.color[y * fb.width + x] = TILE_COLORS[parity];
        }
    }
}

/// Projects a vertex through the frame's model and view matrices. Returns
/// `None` behind the camera.
fn project(v: &Vertex, frame: &Frame, width: f32, height: f32) -> Option<ScreenVertex> {
    let world = frame
        .model
        .transform([v.position.x, v.position.y, v.position.z, 1.0]);
    let [x, y, z, w] = frame.view.transform(world);
    if w <= 0.0 {
        return None;
    }

    let (nx, ny, nz) = (x / w, y / w, z / w);
    Some(ScreenVertex {
        screen_position: [(nx + 1.0) / 2.0 * width, (1.0 - ny) / 2.0 * height],
        depth: nz,
        color: v.color,
    })
}

/// Draws a triangle list with the frame's matrices.
///
/// `light_dir` points from the surface toward the light, in the same space
/// the model matrix maps into.
pub fn draw_mesh(
    fb: &mut Framebuffer,
    frame: &Frame,
    vertices: &[Vertex],
    light_dir: Vec3,
    mode: RenderMode,
) {
    let (width, height) = (fb.width as f32, fb.height as f32);

    for triangle in vertices.chunks_exact(3) {
        let projected: Option<Vec<ScreenVertex>> = triangle
            .iter()
            .map(|v| project(v, frame, width, height))
            .collect();
        let Some(projected) = projected else {
            continue;
        };

        match mode {
            RenderMode::Solid => {
                let normal = frame.model.transform_vector(triangle[0].normal);
                let intensity = calculate_light_intensity(normal, light_dir);
                draw_triangle(fb, &projected[0], &projected[1], &projected[2], intensity);
            }
            RenderMode::Wireframe => {
                for i in 0..3 {
                    let (a, b) = (projected[i].screen_position, projected[(i + 1) % 3].screen_position);
                    draw_line(fb, a, b, EDGE_COLOR);
                }
            }
        }
    }
}

/// Draws a triangle with depth testing and flat lighting
fn draw_triangle(
    fb: &mut Framebuffer,
    v0: &ScreenVertex,
    v1: &ScreenVertex,
    v2: &ScreenVertex,
    intensity: f32,
) {
    let (p0, p1, p2) = (v0.screen_position, v1.screen_position, v2.screen_position);

    // Compute bounding box of the triangle
    let min_x = p0[0].min(p1[0]).min(p2[0]).floor().max(0.0) as usize;
    let max_x = p0[0].max(p1[0]).max(p2[0]).ceil().min(fb.width as f32 - 1.0);
    let min_y = p0[1].min(p1[1]).min(p2[1]).floor().max(0.0) as usize;
    let max_y = p0[1].max(p1[1]).max(p2[1]).ceil().min(fb.height as f32 - 1.0);
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }
    let (max_x, max_y) = (max_x as usize, max_y as usize);

    // Precompute area of the triangle; either winding is accepted
    let area = edge_function(&p0, &p1, &p2);
    if area == 0.0 {
        return;
    }

    // For each pixel in the bounding box
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = [x as f32 + 0.5, y as f32 + 0.5];

            // Normalized barycentric coordinates
            let w0 = edge_function(&p1, &p2, &p) / area;
            let w1 = edge_function(&p2, &p0, &p) / area;
            let w2 = edge_function(&p0, &p1, &p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let depth = v0.depth * w0 + v1.depth * w1 + v2.depth * w2;
            if !(-1.0..=1.0).contains(&depth) {
                continue;
            }

            // Depth test
            let offset = y * fb.width + x;
            if depth < fb.depth[offset] {
                fb.depth[offset] = depth;

                let color = [0, 1, 2].map(|c| v0.color[c] * w0 + v1.color[c] * w1 + v2.color[c] * w2);
                fb.color[offset] = apply_lighting(color, intensity);
            }
        }
    }
}

/// Draws a line between two points using Bresenham's algorithm
fn draw_line(fb: &mut Framebuffer, from: [f32; 2], to: [f32; 2], color: [u8; 3]) {
    let (mut x0, mut y0, x1, y1) = (
        from[0].round() as isize,
        from[1].round() as isize,
        to[0].round() as isize,
        to[1].round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        if x0 >= 0 && x0 < fb.width as isize && y0 >= 0 && y0 < fb.height as isize {
            fb.color[y0 as usize * fb.width + x0 as usize] = color;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
