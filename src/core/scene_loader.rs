// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::bsdf::Material;
use crate::core::scene::Scene;
use crate::emitters::area::AreaLight;
use crate::integrators::path::PathIntegratorConfig;
use crate::io::obj_utils::{self, MeshTransform, ObjLoadError};
use crate::materials::dielectric::Dielectric;
use crate::materials::lambertian::Lambertian;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::renderers::renderer::RendererConfig;
use crate::scenes::box_scene;
use crate::sensors::perspective::PerspectiveCamera;
use crate::shapes::triangle::Triangle;

#[derive(Debug)]
pub enum SceneLoadError {
    Io(std::io::Error),
    Xml(quick_xml::Error),
    Parse(String),
    MissingField(&'static str),
    UnknownReference(String),
    Mesh(ObjLoadError),
}

impl From<std::io::Error> for SceneLoadError {
    fn from(err: std::io::Error) -> Self {
        SceneLoadError::Io(err)
    }
}

impl From<quick_xml::Error> for SceneLoadError {
    fn from(err: quick_xml::Error) -> Self {
        SceneLoadError::Xml(err)
    }
}

impl From<ObjLoadError> for SceneLoadError {
    fn from(err: ObjLoadError) -> Self {
        SceneLoadError::Mesh(err)
    }
}

impl fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneLoadError::Io(err) => write!(f, "io error: {}", err),
            SceneLoadError::Xml(err) => write!(f, "xml error: {}", err),
            SceneLoadError::Parse(msg) => write!(f, "parse error: {}", msg),
            SceneLoadError::MissingField(field) => write!(f, "missing field: {}", field),
            SceneLoadError::UnknownReference(id) => write!(f, "unknown bsdf reference: {}", id),
            SceneLoadError::Mesh(err) => write!(f, "mesh error: {}", err),
        }
    }
}

impl std::error::Error for SceneLoadError {}

pub struct SceneLoadResult {
    pub scene: Scene,
    pub camera: Option<PerspectiveCamera>,
    pub integrator: PathIntegratorConfig,
    pub renderer: RendererConfig,
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneLoadError> {
    let result = load_scene_with_settings(path)?;
    Ok(result.scene)
}

pub fn load_scene_with_settings<P: AsRef<Path>>(path: P) -> Result<SceneLoadResult, SceneLoadError> {
    let path = path.as_ref();
    log::info!("Loading scene: {}.", path.display());
    let xml = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_scene(&xml, base_dir)
}

#[derive(Default)]
struct SensorState {
    fov: Option<Float>,
    focal_distance: Option<Float>,
    origin: Option<Vector3f>,
    direction: Option<Vector3f>,
    up: Option<Vector3f>,
    right: Option<Vector3f>,
    width: Option<usize>,
    height: Option<usize>,
}

struct BsdfState {
    id: String,
    kind: String,
    reflectance: Option<RGBSpectrum>,
    eta: Option<Float>,
    roughness: Option<Float>,
}

struct ShapeState {
    kind: String,
    filename: Option<String>,
    bsdf_ref: Option<String>,
    vectors: HashMap<String, Vector3f>,
    scale: Vector3f,
    translate: Vector3f,
}

#[derive(Default)]
struct EmitterState {
    vectors: HashMap<String, Vector3f>,
    radiance: Option<RGBSpectrum>,
}

struct SceneParser<'a> {
    base_dir: &'a Path,
    defaults: HashMap<String, String>,

    in_integrator: bool,
    in_film: bool,
    in_transform: bool,
    sensor: Option<SensorState>,
    bsdf: Option<BsdfState>,
    shape: Option<ShapeState>,
    emitter: Option<EmitterState>,

    integrator: PathIntegratorConfig,
    renderer: RendererConfig,
    camera: Option<PerspectiveCamera>,
    materials: Vec<Material>,
    material_ids: HashMap<String, usize>,
    triangles: Vec<Triangle>,
    light: Option<AreaLight>,
}

fn parse_scene(xml: &str, base_dir: &Path) -> Result<SceneLoadResult, SceneLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut parser = SceneParser::new(base_dir);
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(e) => parser.start(&e)?,
            Event::Empty(e) => {
                parser.start(&e)?;
                parser.end(e.name().as_ref())?;
            }
            Event::End(e) => parser.end(e.name().as_ref())?,
            _ => {}
        }
        buf.clear();
    }

    parser.finish()
}

impl<'a> SceneParser<'a> {
    fn new(base_dir: &'a Path) -> Self {
        Self {
            base_dir,
            defaults: HashMap::new(),
            in_integrator: false,
            in_film: false,
            in_transform: false,
            sensor: None,
            bsdf: None,
            shape: None,
            emitter: None,
            integrator: PathIntegratorConfig::default(),
            renderer: RendererConfig::default(),
            camera: None,
            materials: Vec::new(),
            material_ids: HashMap::new(),
            triangles: Vec::new(),
            light: None,
        }
    }

    fn attr(&self, e: &BytesStart, key: &[u8]) -> Result<Option<String>, SceneLoadError> {
        for attr in e.attributes().flatten() {
            if attr.key.as_ref() == key {
                let raw = attr.unescape_value()?;
                return Ok(Some(resolve_value(&raw, &self.defaults)));
            }
        }
        Ok(None)
    }

    fn name_value(&self, e: &BytesStart) -> Result<Option<(String, String)>, SceneLoadError> {
        match (self.attr(e, b"name")?, self.attr(e, b"value")?) {
            (Some(name), Some(value)) => Ok(Some((name, value))),
            _ => Ok(None),
        }
    }

    fn start(&mut self, e: &BytesStart) -> Result<(), SceneLoadError> {
        match e.name().as_ref() {
            b"default" => {
                if let Some((name, value)) = self.name_value(e)? {
                    self.defaults.insert(name, value);
                }
            }
            b"integrator" => {
                let kind = self.attr(e, b"type")?.unwrap_or_else(|| "path".to_string());
                if kind != "path" {
                    return Err(SceneLoadError::Parse(format!("unsupported integrator: {}", kind)));
                }
                self.in_integrator = true;
            }
            b"sensor" => {
                let kind = self.attr(e, b"type")?.unwrap_or_default();
                if kind != "perspective" {
                    return Err(SceneLoadError::Parse(format!("unsupported sensor: {}", kind)));
                }
                self.sensor = Some(SensorState::default());
            }
            b"film" => self.in_film = self.sensor.is_some(),
            b"bsdf" => {
                let id = self.attr(e, b"id")?.ok_or(SceneLoadError::MissingField("bsdf.id"))?;
                let kind = self.attr(e, b"type")?.ok_or(SceneLoadError::MissingField("bsdf.type"))?;
                self.bsdf = Some(BsdfState { id, kind, reflectance: None, eta: None, roughness: None });
            }
            b"shape" => {
                let kind = self.attr(e, b"type")?.ok_or(SceneLoadError::MissingField("shape.type"))?;
                self.shape = Some(ShapeState {
                    kind,
                    filename: None,
                    bsdf_ref: None,
                    vectors: HashMap::new(),
                    scale: Vector3f::new(1.0, 1.0, 1.0),
                    translate: Vector3f::zeros(),
                });
            }
            b"emitter" => {
                let kind = self.attr(e, b"type")?.unwrap_or_default();
                if kind != "area" {
                    return Err(SceneLoadError::Parse(format!("unsupported emitter: {}", kind)));
                }
                self.emitter = Some(EmitterState::default());
            }
            b"transform" => self.in_transform = self.shape.is_some(),
            b"translate" => {
                if self.in_transform {
                    let x = self.float_attr(e, b"x")?.unwrap_or(0.0);
                    let y = self.float_attr(e, b"y")?.unwrap_or(0.0);
                    let z = self.float_attr(e, b"z")?.unwrap_or(0.0);
                    if let Some(shape) = self.shape.as_mut() {
                        shape.translate += Vector3f::new(x, y, z);
                    }
                }
            }
            b"scale" => {
                if self.in_transform {
                    let s = match self.float_attr(e, b"value")? {
                        Some(u) => Vector3f::new(u, u, u),
                        None => Vector3f::new(self.float_attr(e, b"x")?.unwrap_or(1.0),
                                              self.float_attr(e, b"y")?.unwrap_or(1.0),
                                              self.float_attr(e, b"z")?.unwrap_or(1.0)),
                    };
                    if let Some(shape) = self.shape.as_mut() {
                        shape.scale = shape.scale.component_mul(&s);
                    }
                }
            }
            b"ref" => {
                let id = self.attr(e, b"id")?;
                if let Some(shape) = self.shape.as_mut() {
                    shape.bsdf_ref = id;
                }
            }
            b"integer" => {
                if let Some((name, value)) = self.name_value(e)? {
                    self.set_integer(&name, &value)?;
                }
            }
            b"float" => {
                if let Some((name, value)) = self.name_value(e)? {
                    self.set_float(&name, parse_float(&value)?);
                }
            }
            b"string" => {
                if let Some((name, value)) = self.name_value(e)? {
                    if let (Some(shape), "filename") = (self.shape.as_mut(), name.as_str()) {
                        shape.filename = Some(value);
                    }
                }
            }
            b"vector" | b"point" => {
                if let Some((name, value)) = self.name_value(e)? {
                    self.set_vector(name, parse_vec3(&value)?);
                }
            }
            b"rgb" => {
                if let Some((name, value)) = self.name_value(e)? {
                    let rgb = parse_vec3(&value)?;
                    if let (Some(bsdf), "reflectance") = (self.bsdf.as_mut(), name.as_str()) {
                        bsdf.reflectance = Some(rgb);
                    } else if let (Some(emitter), "radiance") = (self.emitter.as_mut(), name.as_str()) {
                        emitter.radiance = Some(rgb);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) -> Result<(), SceneLoadError> {
        match name {
            b"integrator" => self.in_integrator = false,
            b"film" => self.in_film = false,
            b"transform" => self.in_transform = false,
            b"sensor" => {
                if let Some(sensor) = self.sensor.take() {
                    self.camera = Some(build_camera(sensor)?);
                }
            }
            b"bsdf" => {
                if let Some(bsdf) = self.bsdf.take() {
                    let material = build_material(&bsdf)?;
                    log::debug!("Loaded bsdf '{}' ({}).", bsdf.id, material.name());
                    self.material_ids.insert(bsdf.id, self.materials.len());
                    self.materials.push(material);
                }
            }
            b"shape" => {
                if let Some(shape) = self.shape.take() {
                    self.add_shape(shape)?;
                }
            }
            b"emitter" => {
                if let Some(emitter) = self.emitter.take() {
                    if self.light.is_some() {
                        return Err(SceneLoadError::Parse("only one area emitter is supported".to_string()));
                    }
                    self.light = Some(build_light(&emitter)?);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn float_attr(&self, e: &BytesStart, key: &[u8]) -> Result<Option<Float>, SceneLoadError> {
        match self.attr(e, key)? {
            Some(v) => Ok(Some(parse_float(&v)?)),
            None => Ok(None),
        }
    }

    fn set_integer(&mut self, name: &str, value: &str) -> Result<(), SceneLoadError> {
        if let Some(sensor) = self.sensor.as_mut() {
            if self.in_film {
                match name {
                    "width" => sensor.width = Some(parse_usize(value)?),
                    "height" => sensor.height = Some(parse_usize(value)?),
                    _ => {}
                }
            }
            return Ok(());
        }
        if self.in_integrator {
            match name {
                "sample_count" | "spp" => {
                    self.integrator.samples_per_pixel = parse_u32(value)?;
                }
                "seed" => {
                    self.renderer.seed = value.parse::<u64>()
                        .map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn set_float(&mut self, name: &str, value: Float) {
        if let Some(sensor) = self.sensor.as_mut() {
            match name {
                "fov" => sensor.fov = Some(value),
                "focal_distance" => sensor.focal_distance = Some(value),
                _ => {}
            }
        } else if let Some(bsdf) = self.bsdf.as_mut() {
            match name {
                "int_ior" | "eta" => bsdf.eta = Some(value),
                "alpha" | "roughness" => bsdf.roughness = Some(value),
                _ => {}
            }
        } else if self.in_integrator {
            match name {
                "rr_probability" => self.integrator.rr_probability = value,
                "ray_offset" => self.integrator.ray_offset = value,
                "max_sample_value" => self.renderer.max_sample_value = value,
                _ => {}
            }
        }
    }

    fn set_vector(&mut self, name: String, value: Vector3f) {
        if let Some(sensor) = self.sensor.as_mut() {
            match name.as_str() {
                "origin" => sensor.origin = Some(value),
                "direction" => sensor.direction = Some(value),
                "up" => sensor.up = Some(value),
                "right" => sensor.right = Some(value),
                _ => {}
            }
        } else if let Some(emitter) = self.emitter.as_mut() {
            emitter.vectors.insert(name, value);
        } else if let Some(shape) = self.shape.as_mut() {
            shape.vectors.insert(name, value);
        }
    }

    fn material_ref(&self, shape: &ShapeState) -> Result<usize, SceneLoadError> {
        let id = shape.bsdf_ref.as_ref().ok_or(SceneLoadError::MissingField("shape.ref"))?;
        self.material_ids
            .get(id)
            .copied()
            .ok_or_else(|| SceneLoadError::UnknownReference(id.clone()))
    }

    fn add_shape(&mut self, shape: ShapeState) -> Result<(), SceneLoadError> {
        match shape.kind.as_str() {
            "obj" => {
                let material_id = self.material_ref(&shape)?;
                let filename = shape.filename.clone().ok_or(SceneLoadError::MissingField("shape.filename"))?;
                let filename = resolve_path(self.base_dir, &filename);
                let transform = MeshTransform { scale: shape.scale, translate: shape.translate };
                let mesh = obj_utils::load_triangles_from_file(&filename, material_id, &transform)?;
                self.triangles.extend(mesh);
            }
            "quad" => {
                let material_id = self.material_ref(&shape)?;
                let position = *shape.vectors.get("position").ok_or(SceneLoadError::MissingField("quad.position"))?;
                let edge_x = *shape.vectors.get("edge_x").ok_or(SceneLoadError::MissingField("quad.edge_x"))?;
                let edge_y = *shape.vectors.get("edge_y").ok_or(SceneLoadError::MissingField("quad.edge_y"))?;
                let normal = shape.vectors.get("normal").copied().unwrap_or_else(|| edge_x.cross(&edge_y));

                let p00 = position;
                let p10 = position + edge_x;
                let p01 = position + edge_y;
                let p11 = position + edge_x + edge_y;
                self.triangles.push(Triangle::new(p00, p10, p11, material_id).with_normal(normal));
                self.triangles.push(Triangle::new(p00, p11, p01, material_id).with_normal(normal));
            }
            "box" => {
                // The enclosure brings its own wall materials.
                let offset = self.materials.len();
                self.materials.extend(box_scene::box_materials().into_iter().take(box_scene::GLASS_MATERIAL));
                for mut wall in box_scene::box_walls() {
                    wall.material_id += offset;
                    self.triangles.push(wall);
                }
            }
            other => {
                return Err(SceneLoadError::Parse(format!("unsupported shape: {}", other)));
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<SceneLoadResult, SceneLoadError> {
        let light = self.light.ok_or(SceneLoadError::MissingField("emitter"))?;
        let scene = Scene::with_light_geometry(self.triangles, self.materials, light);
        log::info!("Scene loaded: {} triangles.", scene.len());

        Ok(SceneLoadResult {
            scene,
            camera: self.camera,
            integrator: self.integrator,
            renderer: self.renderer,
        })
    }
}

fn build_camera(sensor: SensorState) -> Result<PerspectiveCamera, SceneLoadError> {
    Ok(PerspectiveCamera::new(
        sensor.fov.ok_or(SceneLoadError::MissingField("sensor.fov"))?,
        sensor.focal_distance.unwrap_or(1.0),
        sensor.origin.ok_or(SceneLoadError::MissingField("sensor.origin"))?,
        sensor.direction.ok_or(SceneLoadError::MissingField("sensor.direction"))?,
        sensor.up.ok_or(SceneLoadError::MissingField("sensor.up"))?,
        sensor.right.ok_or(SceneLoadError::MissingField("sensor.right"))?,
        sensor.width.ok_or(SceneLoadError::MissingField("film.width"))?,
        sensor.height.ok_or(SceneLoadError::MissingField("film.height"))?,
    ))
}

fn build_material(bsdf: &BsdfState) -> Result<Material, SceneLoadError> {
    match bsdf.kind.as_str() {
        "diffuse" => {
            let albedo = bsdf.reflectance.unwrap_or_else(|| RGBSpectrum::new(0.5, 0.5, 0.5));
            Ok(Lambertian::new(albedo).into())
        }
        "roughdielectric" => {
            Ok(Dielectric::new(bsdf.eta.unwrap_or(1.5), bsdf.roughness.unwrap_or(0.25)).into())
        }
        other => Err(SceneLoadError::Parse(format!("unsupported bsdf: {}", other))),
    }
}

fn build_light(emitter: &EmitterState) -> Result<AreaLight, SceneLoadError> {
    let position = *emitter.vectors.get("position").ok_or(SceneLoadError::MissingField("emitter.position"))?;
    let edge_x = *emitter.vectors.get("edge_x").ok_or(SceneLoadError::MissingField("emitter.edge_x"))?;
    let edge_y = *emitter.vectors.get("edge_y").ok_or(SceneLoadError::MissingField("emitter.edge_y"))?;
    let normal = emitter.vectors.get("normal").copied().unwrap_or_else(|| edge_x.cross(&edge_y));
    let radiance = emitter.radiance.ok_or(SceneLoadError::MissingField("emitter.radiance"))?;
    Ok(AreaLight::new(position, edge_x, edge_y, normal, radiance))
}

fn resolve_path(base_dir: &Path, filename: &str) -> PathBuf {
    if Path::new(filename).is_absolute() {
        PathBuf::from(filename)
    } else {
        base_dir.join(filename)
    }
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

fn parse_float(value: &str) -> Result<Float, SceneLoadError> {
    value.trim().parse::<Float>().map_err(|_| SceneLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_u32(value: &str) -> Result<u32, SceneLoadError> {
    value.trim().parse::<u32>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_usize(value: &str) -> Result<usize, SceneLoadError> {
    value.trim().parse::<usize>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_vec3(value: &str) -> Result<Vector3f, SceneLoadError> {
    let mut parts = value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty());
    let x = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    let y = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    let z = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    Ok(Vector3f::new(parse_float(x)?, parse_float(y)?, parse_float(z)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sensor::Sensor;
    use crate::math::constants::Vector2f;

    const QUAD_SCENE: &str = r#"
<scene version="0.1">
    <default name="spp" value="8"/>
    <integrator type="path">
        <integer name="sample_count" value="$spp"/>
        <integer name="seed" value="7"/>
        <float name="rr_probability" value="0.75"/>
        <float name="max_sample_value" value="20"/>
    </integrator>
    <sensor type="perspective">
        <float name="fov" value="45"/>
        <float name="focal_distance" value="1"/>
        <vector name="origin" value="0, 0, 2"/>
        <vector name="direction" value="0, 0, -1"/>
        <vector name="up" value="0, 1, 0"/>
        <vector name="right" value="1, 0, 0"/>
        <film type="hdrfilm">
            <integer name="width" value="32"/>
            <integer name="height" value="16"/>
        </film>
    </sensor>
    <bsdf type="diffuse" id="gray">
        <rgb name="reflectance" value="0.5, 0.5, 0.5"/>
    </bsdf>
    <bsdf type="roughdielectric" id="glass">
        <float name="int_ior" value="1.33"/>
        <float name="alpha" value="0.1"/>
    </bsdf>
    <shape type="quad">
        <vector name="position" value="-1, -1, 0"/>
        <vector name="edge_x" value="2, 0, 0"/>
        <vector name="edge_y" value="0, 2, 0"/>
        <ref id="gray"/>
    </shape>
    <emitter type="area">
        <vector name="position" value="-0.1, -0.1, 1"/>
        <vector name="edge_x" value="0.2, 0, 0"/>
        <vector name="edge_y" value="0, 0.2, 0"/>
        <vector name="normal" value="0, 0, -1"/>
        <rgb name="radiance" value="4, 4, 4"/>
    </emitter>
</scene>
"#;

    #[test]
    fn test_parse_quad_scene() {
        let result = parse_scene(QUAD_SCENE, Path::new(".")).expect("scene parses");

        assert_eq!(result.integrator.samples_per_pixel, 8);
        assert_eq!(result.integrator.rr_probability, 0.75);
        assert_eq!(result.renderer.seed, 7);
        assert_eq!(result.renderer.max_sample_value, 20.0);

        let scene = result.scene;
        assert_eq!(scene.materials().len(), 2);
        assert_eq!(scene.material(1).map(|m| m.name()), Some("roughdielectric"));
        // Quad plus the two light triangles.
        assert_eq!(scene.len(), 4);
        assert_eq!(scene.light().radiance(), RGBSpectrum::new(4.0, 4.0, 4.0));

        let camera = result.camera.expect("camera parsed");
        assert_eq!((camera.width(), camera.height()), (32, 16));
        let ray = camera.sample_ray(&Vector2f::new(0.5, 0.5));
        let hit = scene.ray_intersection(&ray).expect("camera sees the light");
        assert!(hit.is_emitter());
    }

    #[test]
    fn test_parse_box_scene() {
        let xml = r#"
<scene>
    <shape type="box"/>
    <emitter type="area">
        <vector name="position" value="0.195, -0.355, 0.545"/>
        <vector name="edge_x" value="0.16, 0, 0"/>
        <vector name="edge_y" value="0, 0.16, 0"/>
        <vector name="normal" value="0, 0, -1"/>
        <rgb name="radiance" value="50, 50, 50"/>
    </emitter>
</scene>
"#;
        let result = parse_scene(xml, Path::new(".")).expect("box scene parses");
        assert!(result.camera.is_none());
        assert_eq!(result.integrator, PathIntegratorConfig::default());
        assert_eq!(result.scene.len(), 12);
        assert_eq!(result.scene.materials().len(), 5);
    }

    #[test]
    fn test_scene_errors() {
        let missing_light = r#"<scene><bsdf type="diffuse" id="a"/></scene>"#;
        match parse_scene(missing_light, Path::new(".")) {
            Err(SceneLoadError::MissingField("emitter")) => {}
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("scene without emitter accepted"),
        }

        let bad_ref = r#"<scene>
            <shape type="quad">
                <vector name="position" value="0, 0, 0"/>
                <vector name="edge_x" value="1, 0, 0"/>
                <vector name="edge_y" value="0, 1, 0"/>
                <ref id="nope"/>
            </shape>
        </scene>"#;
        match parse_scene(bad_ref, Path::new(".")) {
            Err(SceneLoadError::UnknownReference(id)) => assert_eq!(id, "nope"),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("dangling reference accepted"),
        }

        let bad_float = r#"<scene><integrator type="path"><float name="ray_offset" value="abc"/></integrator></scene>"#;
        assert!(matches!(parse_scene(bad_float, Path::new(".")), Err(SceneLoadError::Parse(_))));
    }
}
