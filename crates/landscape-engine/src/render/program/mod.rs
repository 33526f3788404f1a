//! Shader program builder.
//!
//! Compiles the vertex and fragment stages independently, links them into one
//! program and resolves the three binding points every draw call relies on:
//! the `position` attribute, the `resolution` uniform and the `color` uniform.
//!
//! Compilation and linking run on the CPU (WGSL is parsed and validated with
//! `naga`), so a broken program is reported before any GPU object exists.
//! Failures are logged and returned; nothing in here panics.

mod builder;
mod error;

pub use builder::{
    compile_shader, link_program, BindingSlot, CompiledShader, LinkedProgram, ProgramBuilder,
    ProgramLayout, COLOR_UNIFORM, FRAGMENT_ENTRY, POSITION_ATTRIBUTE, RESOLUTION_UNIFORM,
    VERTEX_ENTRY,
};
pub use error::{ProgramError, ShaderStage};
