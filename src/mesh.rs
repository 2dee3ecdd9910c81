//! Static geometry: the spinning cube and the tiled background quad.

use crate::math::{calculate_normal, Vec3};
use crate::vertex::{BackgroundVertex, Vertex};

/// Background texture tiles repeat every this many pixels
pub const TILE_SIZE: f32 = 16.0;

/// Two counter-clockwise triangles, 0-2-3 and 2-0-1, over the quad corners
pub const BACKGROUND_INDICES: [u8; 6] = [0, 2, 3, 2, 0, 1];

/// Corner vertices of a unit cube
const CORNERS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Triangles in a unit cube, two per face
const TRIANGLES: [[usize; 3]; 12] = [
    [0, 2, 1],
    [0, 2, 3],
    [0, 5, 4],
    [0, 5, 1],
    [5, 2, 6],
    [5, 2, 1],
    [2, 7, 6],
    [2, 7, 3],
    [4, 3, 7],
    [4, 3, 0],
    [6, 4, 7],
    [6, 4, 5],
];

fn shade(channel: f32) -> f32 {
    channel * 0.8 + 0.1
}

/// Color of a cube corner: its unit-cube coordinates, pulled twice toward the
/// middle of the range
fn corner_color(corner: [f32; 3]) -> [f32; 3] {
    corner.map(|c| shade(shade(c)))
}

/// The cube centered on the origin, as a flat triangle list (36 vertices).
pub fn cube() -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(TRIANGLES.len() * 3);

    for triangle in &TRIANGLES {
        let [a, b, c] = triangle.map(|i| {
            let [x, y, z] = CORNERS[i];
            Vec3::new(x - 0.5, y - 0.5, z - 0.5)
        });

        // The index table mixes windings, so orient each normal away from the
        // cube center instead of trusting the vertex order.
        let mut normal = calculate_normal(a, b, c);
        let centroid = Vec3::new(
            (a.x + b.x + c.x) / 3.0,
            (a.y + b.y + c.y) / 3.0,
            (a.z + b.z + c.z) / 3.0,
        );
        if normal.dot(centroid) < 0.0 {
            normal = Vec3::new(-normal.x, -normal.y, -normal.z);
        }

        for (position, &index) in [a, b, c].into_iter().zip(triangle) {
            vertices.push(Vertex {
                position,
                color: corner_color(CORNERS[index]),
                normal,
            });
        }
    }

    vertices
}

/// Full-screen background quad for a `width` x `height` pixel window.
///
/// The corners are, counter-clockwise from bottom left:
///
/// ```text
///   3--2
///   |  |
///   0--1
/// ```
///
/// Texture coordinates count tiles, so one unit of `u` or `v` spans
/// [`TILE_SIZE`] pixels.
pub fn background(width: u32, height: u32) -> [BackgroundVertex; 4] {
    let wd = width as f32 / TILE_SIZE;
    let ht = height as f32 / TILE_SIZE;

    [
        BackgroundVertex { x: -1.0, y: -1.0, u: 0.0, v: 0.0 }, // Bottom left
        BackgroundVertex { x: 1.0, y: -1.0, u: wd, v: 0.0 },   // Bottom right
        BackgroundVertex { x: 1.0, y: 1.0, u: wd, v: ht },     // Top right
        BackgroundVertex { x: -1.0, y: 1.0, u: 0.0, v: ht },   // Top left
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_twelve_triangles() {
        let cube = cube();
        assert_eq!(cube.len(), 36);
        for v in &cube {
            for c in [v.position.x, v.position.y, v.position.z] {
                assert!(c == -0.5 || c == 0.5);
            }
        }
    }

    #[test]
    fn cube_normals_point_outward_along_an_axis() {
        for v in cube() {
            let n = v.normal;
            assert!((n.length() - 1.0).abs() < 1e-6);
            // The vertex lies on the face the normal points at
            assert!((v.position.dot(n) - 0.5).abs() < 1e-6, "{v:?}");
        }
    }

    #[test]
    fn each_face_is_covered_twice() {
        let cube = cube();
        let mut counts = std::collections::HashMap::new();
        for triangle in cube.chunks(3) {
            let n = triangle[0].normal;
            let key = (n.x as i32, n.y as i32, n.z as i32);
            *counts.entry(key).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&c| c == 2));
    }

    #[test]
    fn corner_colors_are_shaded_twice() {
        assert!(corner_color([0.0, 0.0, 0.0])
            .iter()
            .all(|c| (c - 0.18).abs() < 1e-6));
        let [r, g, b] = corner_color([1.0, 0.0, 1.0]);
        assert!((r - 0.82).abs() < 1e-6);
        assert!((g - 0.18).abs() < 1e-6);
        assert!((b - 0.82).abs() < 1e-6);
    }

    #[test]
    fn background_tiles_every_sixteen_pixels() {
        let quad = background(320, 160);
        assert_eq!(quad[0], BackgroundVertex { x: -1.0, y: -1.0, u: 0.0, v: 0.0 });
        assert_eq!(quad[2].u, 20.0);
        assert_eq!(quad[2].v, 10.0);
        assert_eq!((quad[3].x, quad[3].y), (-1.0, 1.0));
    }

    #[test]
    fn background_indices_cover_all_corners() {
        let mut seen = [false; 4];
        for i in BACKGROUND_INDICES {
            seen[i as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
