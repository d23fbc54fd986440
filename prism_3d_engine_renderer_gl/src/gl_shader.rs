/// GlShader - linked OpenGL program implementing the engine Shader trait
///
/// A program is built from a vertex and a fragment stage plus optional
/// tessellation-control, tessellation-evaluation and geometry stages.
/// Sources come either from memory (`ShaderSources`) or from files under a
/// shader library directory (`ShaderPaths`).
///
/// Uniform setters write to the program's uniform state with glUniform*,
/// so the program must be current (the ShaderManager binds it before
/// configuring). Locations are looked up once per name and cached.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;
use rustc_hash::FxHashMap;
use prism_3d_engine::prism3d::render::{Shader, ShaderId};
use prism_3d_engine::prism3d::{log_error, Error, Result};
use prism_3d_engine::{engine_debug, engine_error};
use crate::gl_debug::check_errors;

// ===== SOURCES =====

/// GLSL sources of every stage
#[derive(Debug, Clone, Default)]
pub struct ShaderSources {
    pub vertex: String,
    pub tessellation_control: Option<String>,
    pub tessellation_evaluation: Option<String>,
    pub geometry: Option<String>,
    pub fragment: String,
}

/// Stage files, relative to `library`
#[derive(Debug, Clone, Default)]
pub struct ShaderPaths {
    /// Shader library directory
    pub library: PathBuf,
    pub vertex: PathBuf,
    pub tessellation_control: Option<PathBuf>,
    pub tessellation_evaluation: Option<PathBuf>,
    pub geometry: Option<PathBuf>,
    pub fragment: PathBuf,
}

impl ShaderPaths {
    /// Vertex + fragment program
    pub fn new(library: impl Into<PathBuf>, vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        Self {
            library: library.into(),
            vertex: vertex.into(),
            fragment: fragment.into(),
            ..Self::default()
        }
    }

    pub fn with_tessellation(
        mut self,
        control: impl Into<PathBuf>,
        evaluation: impl Into<PathBuf>,
    ) -> Self {
        self.tessellation_control = Some(control.into());
        self.tessellation_evaluation = Some(evaluation.into());
        self
    }

    pub fn with_geometry(mut self, geometry: impl Into<PathBuf>) -> Self {
        self.geometry = Some(geometry.into());
        self
    }

    /// Full path of a stage file
    pub fn resolve(&self, stage: &Path) -> PathBuf {
        self.library.join(stage)
    }

    /// Read every stage file
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` naming the first file that cannot be read.
    pub fn load(&self) -> Result<ShaderSources> {
        let read = |stage: &Path| -> Result<String> {
            let path = self.resolve(stage);
            std::fs::read_to_string(&path).map_err(|e| {
                engine_error!("prism3d::gl::Shader", "Cannot read shader file {}: {}", path.display(), e);
                Error::InvalidResource(format!("cannot read shader file {}: {}", path.display(), e))
            })
        };
        let read_optional = |stage: &Option<PathBuf>| -> Result<Option<String>> {
            stage.as_deref().map(&read).transpose()
        };

        Ok(ShaderSources {
            vertex: read(&self.vertex)?,
            tessellation_control: read_optional(&self.tessellation_control)?,
            tessellation_evaluation: read_optional(&self.tessellation_evaluation)?,
            geometry: read_optional(&self.geometry)?,
            fragment: read(&self.fragment)?,
        })
    }
}

// ===== PROGRAM =====

pub struct GlShader {
    gl: Rc<glow::Context>,
    program: glow::Program,
    uniform_locations: RefCell<FxHashMap<String, Option<glow::UniformLocation>>>,
    debug_name: String,
}

impl GlShader {
    /// Compile and link a program from in-memory sources
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` with the driver's info log if a stage
    /// fails to compile or the program fails to link.
    pub fn from_sources(gl: Rc<glow::Context>, sources: &ShaderSources, debug_name: &str) -> Result<Self> {
        let stages = [
            (glow::VERTEX_SHADER, "VERTEX", Some(sources.vertex.as_str())),
            (glow::TESS_CONTROL_SHADER, "TESS_CONTROL", sources.tessellation_control.as_deref()),
            (glow::TESS_EVALUATION_SHADER, "TESS_EVALUATION", sources.tessellation_evaluation.as_deref()),
            (glow::GEOMETRY_SHADER, "GEOMETRY", sources.geometry.as_deref()),
            (glow::FRAGMENT_SHADER, "FRAGMENT", Some(sources.fragment.as_str())),
        ];

        let mut compiled = Vec::with_capacity(stages.len());
        for (stage, label, source) in stages {
            let Some(source) = source else { continue };
            match unsafe { compile_stage(&gl, stage, label, source, debug_name) } {
                Ok(shader) => compiled.push(shader),
                Err(e) => {
                    unsafe { delete_stages(&gl, None, &compiled) };
                    return Err(e);
                }
            }
        }

        let program = unsafe { link_program(&gl, &compiled, debug_name) };
        unsafe { delete_stages(&gl, program.as_ref().ok().copied(), &compiled) };
        let program = program?;

        engine_debug!("prism3d::gl::Shader", "Linked program {} '{}' ({} stages)",
            program.0.get(), debug_name, compiled.len());

        Ok(Self {
            gl,
            program,
            uniform_locations: RefCell::new(FxHashMap::default()),
            debug_name: debug_name.to_string(),
        })
    }

    /// Load stage files and build the program; the debug name is the vertex file name
    pub fn from_paths(gl: Rc<glow::Context>, paths: &ShaderPaths) -> Result<Self> {
        let sources = paths.load()?;
        let debug_name = paths.vertex.display().to_string();
        Self::from_sources(gl, &sources, &debug_name)
    }

    pub fn set_debug_name(&mut self, name: &str) {
        self.debug_name = name.to_string();
    }

    fn location(&self, name: &str) -> Option<glow::UniformLocation> {
        if let Some(location) = self.uniform_locations.borrow().get(name) {
            return location.clone();
        }
        let location = unsafe { self.gl.get_uniform_location(self.program, name) };
        self.uniform_locations.borrow_mut().insert(name.to_string(), location.clone());
        location
    }
}

/// Compile one stage; on failure the stage is deleted and the info log returned
unsafe fn compile_stage(
    gl: &glow::Context,
    stage: u32,
    label: &str,
    source: &str,
    debug_name: &str,
) -> Result<glow::Shader> {
    let shader = gl.create_shader(stage).map_err(|e| {
        log_error("prism3d::gl::Shader",
            Error::InitializationFailed(format!("glCreateShader({}) failed: {}", label, e)))
    })?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let info_log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        engine_error!("prism3d::gl::Shader", "'{}' {} stage failed to compile:\n{}",
            debug_name, label, info_log);
        return Err(Error::InitializationFailed(format!(
            "{} stage of '{}' failed to compile: {}", label, debug_name, info_log
        )));
    }
    Ok(shader)
}

unsafe fn link_program(gl: &glow::Context, stages: &[glow::Shader], debug_name: &str) -> Result<glow::Program> {
    let program = gl.create_program().map_err(|e| {
        log_error("prism3d::gl::Shader", Error::InitializationFailed(format!("glCreateProgram failed: {}", e)))
    })?;
    for &shader in stages {
        gl.attach_shader(program, shader);
    }
    gl.link_program(program);
    check_errors(gl, "glLinkProgram");

    if !gl.get_program_link_status(program) {
        let info_log = gl.get_program_info_log(program);
        for &shader in stages {
            gl.detach_shader(program, shader);
        }
        gl.delete_program(program);
        engine_error!("prism3d::gl::Shader", "'{}' failed to link:\n{}", debug_name, info_log);
        return Err(Error::InitializationFailed(format!(
            "'{}' failed to link: {}", debug_name, info_log
        )));
    }
    Ok(program)
}

/// Stages are not needed once linked (or once linking is abandoned)
unsafe fn delete_stages(gl: &glow::Context, program: Option<glow::Program>, stages: &[glow::Shader]) {
    for &shader in stages {
        if let Some(program) = program {
            gl.detach_shader(program, shader);
        }
        gl.delete_shader(shader);
    }
}

impl Shader for GlShader {
    fn id(&self) -> ShaderId {
        self.program.0.get()
    }

    fn debug_name(&self) -> &str {
        &self.debug_name
    }

    fn set_bool(&self, name: &str, value: bool) {
        self.set_int(name, value as i32);
    }

    fn set_int(&self, name: &str, value: i32) {
        unsafe { self.gl.uniform_1_i32(self.location(name).as_ref(), value) };
    }

    fn set_uint(&self, name: &str, value: u32) {
        unsafe { self.gl.uniform_1_u32(self.location(name).as_ref(), value) };
    }

    fn set_float(&self, name: &str, value: f32) {
        unsafe { self.gl.uniform_1_f32(self.location(name).as_ref(), value) };
    }

    fn set_mat3(&self, name: &str, value: &Mat3) {
        unsafe {
            self.gl.uniform_matrix_3_f32_slice(self.location(name).as_ref(), false, &value.to_cols_array())
        };
    }

    fn set_mat4(&self, name: &str, value: &Mat4) {
        unsafe {
            self.gl.uniform_matrix_4_f32_slice(self.location(name).as_ref(), false, &value.to_cols_array())
        };
    }

    fn set_vec2(&self, name: &str, value: Vec2) {
        unsafe { self.gl.uniform_2_f32_slice(self.location(name).as_ref(), &value.to_array()) };
    }

    fn set_vec3(&self, name: &str, value: Vec3) {
        unsafe { self.gl.uniform_3_f32_slice(self.location(name).as_ref(), &value.to_array()) };
    }

    fn set_vec4(&self, name: &str, value: Vec4) {
        unsafe { self.gl.uniform_4_f32_slice(self.location(name).as_ref(), &value.to_array()) };
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
        }
    }
}

#[cfg(test)]
#[path = "gl_shader_tests.rs"]
mod tests;
