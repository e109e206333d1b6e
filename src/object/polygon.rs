//! Convex polygons and triangles: a plane hit restricted to the polygon interior.

use nalgebra::{Point3, Unit, Vector3};

use crate::error::GeometryError;
use crate::object::plane::Plane;
use crate::ray::Ray;
use crate::util::{align_zero, is_zero};

/// A flat convex polygon. Vertices are stored in boundary order.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<Point3<f64>>,
    plane: Plane,
}

impl Polygon {
    /// Validates the vertex list: at least three vertices, no repeated
    /// consecutive vertex, all in one plane, no two consecutive edges on a
    /// line, and a convex boundary traversed once.
    pub fn new(vertices: Vec<Point3<f64>>) -> Result<Self, GeometryError> {
        let n = vertices.len();
        if n < 3 {
            return Err(GeometryError::TooFewVertices(n));
        }

        for i in 0..n {
            let next = (i + 1) % n;
            if is_zero((vertices[next] - vertices[i]).norm()) {
                return Err(GeometryError::DuplicateVertex(next));
            }
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])
            .map_err(|_| GeometryError::CollinearEdges(1))?;
        let normal = plane.normal();

        for (i, vertex) in vertices.iter().enumerate().skip(3) {
            if !is_zero(normal.dot(&(vertex - vertices[0]))) {
                return Err(GeometryError::NotPlanar(i));
            }
        }

        // the plane normal is e0 x e1, so every turn of a convex polygon
        // must point along it
        for i in 0..n {
            let corner = (i + 1) % n;
            let edge = vertices[corner] - vertices[i];
            let next_edge = vertices[(i + 2) % n] - vertices[corner];
            let turn = edge.cross(&next_edge);
            if is_zero(turn.norm()) {
                return Err(GeometryError::CollinearEdges(corner));
            }
            if align_zero(normal.dot(&turn)) < 0.0 {
                return Err(GeometryError::NotConvex(corner));
            }
        }

        // consistent turns still admit star polygons that wind around twice;
        // every vertex must also lie strictly inside every edge
        for i in 0..n {
            let next = (i + 1) % n;
            let edge = vertices[next] - vertices[i];
            for (j, vertex) in vertices.iter().enumerate() {
                if j == i || j == next {
                    continue;
                }
                if align_zero(normal.dot(&edge.cross(&(vertex - vertices[i])))) <= 0.0 {
                    return Err(GeometryError::NotConvex(j));
                }
            }
        }

        Ok(Polygon { vertices, plane })
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// A plane yields at most one hit, so the polygon does too: the plane hit
    /// is kept only when it falls strictly inside every edge.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<f64> {
        let t = self.plane.intersect(ray, max_distance)?;

        let n = self.vertices.len();
        let to_vertices: Vec<Vector3<f64>> = self.vertices.iter()
            .map(|vertex| vertex - ray.origin)
            .collect();

        let mut side = 0.0;
        for i in 0..n {
            let edge_normal = to_vertices[i].cross(&to_vertices[(i + 1) % n]);
            let s = align_zero(ray.direction.dot(&edge_normal));
            if s == 0.0 {
                return None;
            }
            if side == 0.0 {
                side = s.signum();
            } else if side != s.signum() {
                return None;
            }
        }

        Some(t)
    }

    pub fn normal(&self) -> Unit<Vector3<f64>> {
        self.plane.normal()
    }
}

/// Three-vertex polygon.
#[derive(Clone, Debug)]
pub struct Triangle(Polygon);

impl Triangle {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Result<Self, GeometryError> {
        Polygon::new(vec![a, b, c]).map(Triangle)
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        self.0.vertices()
    }

    pub fn plane(&self) -> &Plane {
        self.0.plane()
    }

    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<f64> {
        self.0.intersect(ray, max_distance)
    }

    pub fn normal(&self) -> Unit<Vector3<f64>> {
        self.0.normal()
    }
}
