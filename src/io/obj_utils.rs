use std::fs;
use std::path::Path;

use crate::math::constants::Vector3f;
use crate::shapes::triangle::Triangle;

use wavefront_obj::{obj, ParseError};
use std::fmt;

#[derive(Debug)]
pub enum ObjLoadError {
    Io(std::io::Error),
    Parse(ParseError),
}

impl From<std::io::Error> for ObjLoadError {
    fn from(err: std::io::Error) -> Self {
        ObjLoadError::Io(err)
    }
}

impl From<ParseError> for ObjLoadError {
    fn from(err: ParseError) -> Self {
        ObjLoadError::Parse(err)
    }
}

impl fmt::Display for ObjLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjLoadError::Io(err) => write!(f, "io error: {}", err),
            ObjLoadError::Parse(err) => write!(f, "parse error: {}", err),
        }
    }
}

impl std::error::Error for ObjLoadError {}

/// Per-axis scale followed by a translation, applied to mesh vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTransform {
    pub scale: Vector3f,
    pub translate: Vector3f,
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self {
            scale: Vector3f::new(1.0, 1.0, 1.0),
            translate: Vector3f::zeros(),
        }
    }
}

impl MeshTransform {
    pub fn apply(&self, p: &Vector3f) -> Vector3f {
        p.component_mul(&self.scale) + self.translate
    }
}

pub fn load_obj_from_str<S: AsRef<str>>(input: S) -> Result<obj::ObjSet, ParseError> {
    let triangulated = triangulate_faces(input.as_ref());
    obj::parse(triangulated)
}

pub fn load_obj_from_file<P: AsRef<Path>>(path: P) -> Result<obj::ObjSet, ObjLoadError> {
    let data = fs::read_to_string(path)?;
    let obj_set = load_obj_from_str(data)?;
    Ok(obj_set)
}

/// Flattens every triangle of `obj_set` into scene triangles tagged with
/// `material_id`. Normals follow the face winding after the transform.
pub fn triangles_from_obj(obj_set: &obj::ObjSet, material_id: usize, transform: &MeshTransform) -> Vec<Triangle> {
    let mut triangles = Vec::new();

    for object in &obj_set.objects {
        let vertices: Vec<Vector3f> = object
            .vertices
            .iter()
            .map(|v| transform.apply(&Vector3f::new(v.x as f32, v.y as f32, v.z as f32)))
            .collect();

        for geom in &object.geometry {
            for shape in &geom.shapes {
                if let obj::Primitive::Triangle(a, b, c) = &shape.primitive {
                    let (p0, p1, p2) = match (vertices.get(a.0), vertices.get(b.0), vertices.get(c.0)) {
                        (Some(p0), Some(p1), Some(p2)) => (*p0, *p1, *p2),
                        _ => continue,
                    };
                    let tri = Triangle::new(p0, p1, p2, material_id);
                    // Zero-area faces carry no usable normal.
                    if tri.face_normal.iter().all(|c| c.is_finite()) {
                        triangles.push(tri);
                    }
                }
            }
        }
    }

    triangles
}

pub fn load_triangles_from_file<P: AsRef<Path>>(path: P,
                                                material_id: usize,
                                                transform: &MeshTransform) -> Result<Vec<Triangle>, ObjLoadError> {
    let path = path.as_ref();
    log::info!("Loading OBJ mesh: {}.", path.display());
    let obj_set = load_obj_from_file(path)?;
    let triangles = triangles_from_obj(&obj_set, material_id, transform);
    log::info!("OBJ mesh loaded: {} triangles.", triangles.len());
    Ok(triangles)
}

fn triangulate_faces(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    for line in input.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("f ") || trimmed.starts_with("f\t") {
            let parts: Vec<&str> = trimmed.split_whitespace().collect();
            if parts.len() > 4 {
                let base = parts[1];
                for i in 2..(parts.len() - 1) {
                    out.push_str("f ");
                    out.push_str(base);
                    out.push(' ');
                    out.push_str(parts[i]);
                    out.push(' ');
                    out.push_str(parts[i + 1]);
                    out.push('\n');
                }
                continue;
            }
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}
