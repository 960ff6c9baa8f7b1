//! Shader compilation and linking for WebGL / OpenGL.
//!
//! Building is permissive: a stage that fails to compile is still attached
//! and the program is still linked, so the caller always gets a program
//! handle back. Failures are collected as [`ShaderError`] diagnostics and
//! logged, and the render loop keeps drawing with whatever the driver
//! produced. Only failing to create the GL objects themselves is fatal.

use std::fmt::Write as _;

use thiserror::Error;

/// Problems reported while building a shader program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShaderError {
    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    CompileError {
        /// The shader stage that failed.
        stage: ShaderStage,
        /// Numbered source followed by the driver's info log.
        log: String,
    },
    /// The program failed to link.
    #[error("shader link error:\n{0}")]
    LinkError(String),
    /// The driver could not allocate a shader, program or buffer object.
    #[error("failed to create {object}: {reason}")]
    CreateError {
        object: &'static str,
        reason: String,
    },
}

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The GL enum passed to `createShader`.
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Prefixes every line of `source` with a right-aligned line number.
pub fn numbered_source(source: &str) -> String {
    let line_count = source.lines().count();
    let width = line_count.to_string().len();

    let mut out = String::new();
    for (i, line) in source.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{:>width$}: {line}", i + 1);
    }
    out
}

/// Joins the numbered source and the driver log, skipping whichever is empty.
///
/// Driver logs reference line numbers, so printing them next to the
/// numbered source makes the offending GLSL easy to find.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let numbered = numbered_source(source);
    match (numbered.is_empty(), log.is_empty()) {
        (true, _) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// Turns a compile status into a diagnostic, if the stage failed.
pub fn compile_diagnostic(
    stage: ShaderStage,
    source: &str,
    compiled: bool,
    info_log: &str,
) -> Option<ShaderError> {
    (!compiled).then(|| ShaderError::CompileError {
        stage,
        log: format_shader_error(source, info_log.trim_end()),
    })
}

/// Turns a link status into a diagnostic, if linking failed.
pub fn link_diagnostic(linked: bool, info_log: &str) -> Option<ShaderError> {
    (!linked).then(|| ShaderError::LinkError(info_log.trim_end().to_string()))
}

/// Sends every diagnostic to the error log.
pub fn report_diagnostics(diagnostics: &[ShaderError]) {
    for diagnostic in diagnostics {
        log::error!("{diagnostic}");
    }
}

/// A linked (or attempted) program plus everything that went wrong building it.
#[derive(Debug)]
pub struct ProgramBuild {
    pub program: glow::Program,
    pub diagnostics: Vec<ShaderError>,
}

impl ProgramBuild {
    /// `true` when both stages compiled and the program linked.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Compiles one stage, recording a diagnostic instead of failing on bad GLSL.
///
/// # Errors
///
/// Returns `ShaderError::CreateError` only if the shader object cannot be created.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
    diagnostics: &mut Vec<ShaderError>,
) -> Result<glow::Shader, ShaderError> {
    use glow::HasContext;

    // SAFETY: glow wraps raw GL calls as unsafe. The stage constant is a
    // valid shader type and the handle comes straight from create_shader.
    let shader = unsafe {
        gl.create_shader(stage.gl_type())
            .map_err(|reason| ShaderError::CreateError {
                object: "shader",
                reason,
            })?
    };

    let (compiled, info_log) = unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        let compiled = gl.get_shader_compile_status(shader);
        let info_log = if compiled {
            String::new()
        } else {
            gl.get_shader_info_log(shader)
        };
        (compiled, info_log)
    };

    diagnostics.extend(compile_diagnostic(stage, source, compiled, &info_log));
    Ok(shader)
}

/// Compiles both stages and links them, never failing on bad GLSL.
///
/// Stage objects are detached and deleted after linking; the program keeps
/// its own copy of the linked code.
///
/// # Errors
///
/// Returns `ShaderError::CreateError` if a shader or program object cannot
/// be created.
#[allow(unsafe_code)]
pub fn build_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<ProgramBuild, ShaderError> {
    use glow::HasContext;

    let mut diagnostics = Vec::new();

    let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_src, &mut diagnostics)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, fragment_src, &mut diagnostics) {
        Ok(shader) => shader,
        Err(e) => {
            // SAFETY: vertex is a valid handle from compile_shader.
            unsafe { gl.delete_shader(vertex) };
            return Err(e);
        }
    };

    // SAFETY: both shader handles are valid; the program handle comes from
    // create_program and is only used after a successful creation.
    let program = unsafe {
        match gl.create_program() {
            Ok(program) => program,
            Err(reason) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(ShaderError::CreateError {
                    object: "program",
                    reason,
                });
            }
        }
    };

    let (linked, info_log) = unsafe {
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        let linked = gl.get_program_link_status(program);
        let info_log = if linked {
            String::new()
        } else {
            gl.get_program_info_log(program)
        };

        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        (linked, info_log)
    };

    diagnostics.extend(link_diagnostic(linked, &info_log));

    Ok(ProgramBuild {
        program,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_source_right_aligns_numbers() {
        let source = (1..=10)
            .map(|i| format!("l{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let numbered = numbered_source(&source);
        let lines: Vec<&str> = numbered.lines().collect();
        assert_eq!(lines[0], " 1: l1");
        assert_eq!(lines[9], "10: l10");
    }

    #[test]
    fn numbered_source_of_empty_text_is_empty() {
        assert!(numbered_source("").is_empty());
    }

    #[test]
    fn format_shader_error_puts_log_after_source() {
        let formatted = format_shader_error("void main() {\n}", "ERROR: 0:2: '}' : syntax error");
        assert!(formatted.starts_with("1: void main() {"), "got:\n{formatted}");
        assert!(formatted.ends_with("ERROR: 0:2: '}' : syntax error"), "got:\n{formatted}");
        assert!(formatted.contains("\n\n"), "expected blank separator in:\n{formatted}");
    }

    #[test]
    fn format_shader_error_handles_missing_parts() {
        assert_eq!(format_shader_error("", "only log"), "only log");
        assert_eq!(format_shader_error("x", ""), "1: x");
        assert!(format_shader_error("", "").is_empty());
    }

    #[test]
    fn compiled_stage_has_no_diagnostic() {
        assert_eq!(compile_diagnostic(ShaderStage::Vertex, "src", true, ""), None);
    }

    #[test]
    fn failed_stage_reports_stage_and_log() {
        let diagnostic =
            compile_diagnostic(ShaderStage::Fragment, "float x = ;", false, "unexpected ';'\n")
                .unwrap();
        let msg = diagnostic.to_string();
        assert!(msg.contains("fragment"), "missing stage in: {msg}");
        assert!(msg.contains("1: float x = ;"), "missing source in: {msg}");
        assert!(msg.ends_with("unexpected ';'"), "log not trimmed in: {msg}");
    }

    #[test]
    fn failed_link_reports_log() {
        assert_eq!(link_diagnostic(true, ""), None);
        let diagnostic = link_diagnostic(false, "varying mismatch").unwrap();
        assert!(diagnostic.to_string().contains("varying mismatch"));
    }

    #[test]
    fn create_error_names_the_object() {
        let err = ShaderError::CreateError {
            object: "buffer",
            reason: "context lost".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("buffer") && msg.contains("context lost"), "got: {msg}");
    }

    #[test]
    fn stage_maps_to_gl_enum() {
        assert_eq!(ShaderStage::Vertex.gl_type(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_type(), glow::FRAGMENT_SHADER);
    }

    #[test]
    fn shader_error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ShaderError>();
    }

    #[test]
    #[ignore = "requires GL context"]
    fn build_program_with_bad_fragment_still_returns_program() {
        // Would test: build_program(gl, QUAD_VERTEX_SHADER, "garbage") is Ok
        // with one CompileError and one LinkError diagnostic.
    }
}
