use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::{ProgramError, ShaderStage};

/// Entry point the vertex stage must export.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Entry point the fragment stage must export.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Vertex input holding the pixel-space position (`vec2<f32>`).
pub const POSITION_ATTRIBUTE: &str = "position";
/// Uniform carrying the canvas width/height.
pub const RESOLUTION_UNIFORM: &str = "resolution";
/// Uniform carrying the solid RGBA colour of the current draw.
pub const COLOR_UNIFORM: &str = "color";

/// `@group(g) @binding(b)` of a resource.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BindingSlot {
    pub group: u32,
    pub binding: u32,
}

/// Binding points resolved at link time. Immutable once the program exists.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ProgramLayout {
    /// Shader location of the `position` vertex attribute.
    pub position: u32,
    pub resolution: BindingSlot,
    pub color: BindingSlot,
}

/// One successfully parsed and validated stage.
#[derive(Debug, Clone)]
pub struct CompiledShader {
    stage: ShaderStage,
    source: String,
    module: naga::Module,
}

impl CompiledShader {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A vertex + fragment pair that links, with its resolved [`ProgramLayout`].
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    vertex: CompiledShader,
    fragment: CompiledShader,
    layout: ProgramLayout,
}

impl LinkedProgram {
    /// Builds the solid-colour landscape program shipped with the engine.
    pub fn landscape() -> Result<Self, ProgramError> {
        ProgramBuilder::new(
            include_str!("shaders/landscape.vert.wgsl"),
            include_str!("shaders/landscape.frag.wgsl"),
        )
        .build()
    }

    pub fn layout(&self) -> ProgramLayout {
        self.layout
    }

    pub fn vertex(&self) -> &CompiledShader {
        &self.vertex
    }

    pub fn fragment(&self) -> &CompiledShader {
        &self.fragment
    }
}

/// Compiles and links a program from WGSL source text.
///
/// ```ignore
/// let program = ProgramBuilder::new(vertex_src, fragment_src).build()?;
/// let layout = program.layout();
/// ```
#[derive(Debug, Clone)]
pub struct ProgramBuilder<'s> {
    vertex: &'s str,
    fragment: &'s str,
}

impl<'s> ProgramBuilder<'s> {
    pub fn new(vertex: &'s str, fragment: &'s str) -> Self {
        Self { vertex, fragment }
    }

    /// Compiles both stages, then links them.
    ///
    /// Both stages are compiled even if the first fails so that every
    /// diagnostic reaches the log; the first failure is returned.
    pub fn build(self) -> Result<LinkedProgram, ProgramError> {
        let vertex = compile_shader(ShaderStage::Vertex, self.vertex);
        let fragment = compile_shader(ShaderStage::Fragment, self.fragment);
        link_program(vertex?, fragment?)
    }
}

/// Parses and validates one stage.
///
/// On failure the compiler diagnostic is logged at error level and returned.
pub fn compile_shader(stage: ShaderStage, source: &str) -> Result<CompiledShader, ProgramError> {
    let fail = |diagnostic: String| {
        log::error!("{stage} shader failed to compile:\n{diagnostic}");
        ProgramError::Compile { stage, diagnostic }
    };

    let module = naga::front::wgsl::parse_str(source).map_err(|e| fail(e.emit_to_string(source)))?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| fail(e.emit_to_string(source)))?;

    if !module.entry_points.iter().any(|ep| ep.stage == stage.naga()) {
        return Err(fail(format!("source declares no {stage} entry point")));
    }

    log::debug!("{stage} shader compiled ({} entry points)", module.entry_points.len());

    Ok(CompiledShader {
        stage,
        source: source.to_owned(),
        module,
    })
}

/// Links a vertex and a fragment stage.
///
/// Checks:
/// - both stages are the kind they claim and export the expected entry points
/// - every location the fragment stage reads is written by the vertex stage
/// - `position`, `resolution` and `color` resolve to exactly one slot each,
///   with the two uniforms in different bind groups `{0, 1}`
pub fn link_program(
    vertex: CompiledShader,
    fragment: CompiledShader,
) -> Result<LinkedProgram, ProgramError> {
    let layout = resolve_layout(&vertex, &fragment).map_err(|reason| {
        log::error!("program failed to link: {reason}");
        ProgramError::Link { reason }
    })?;

    log::debug!(
        "program linked: position@{} resolution@{}/{} color@{}/{}",
        layout.position,
        layout.resolution.group,
        layout.resolution.binding,
        layout.color.group,
        layout.color.binding,
    );

    Ok(LinkedProgram {
        vertex,
        fragment,
        layout,
    })
}

fn resolve_layout(vertex: &CompiledShader, fragment: &CompiledShader) -> Result<ProgramLayout, String> {
    if vertex.stage != ShaderStage::Vertex || fragment.stage != ShaderStage::Fragment {
        return Err(format!(
            "expected vertex + fragment stages, got {} + {}",
            vertex.stage, fragment.stage
        ));
    }

    let vs = entry_point(&vertex.module, VERTEX_ENTRY, naga::ShaderStage::Vertex)?;
    let fs = entry_point(&fragment.module, FRAGMENT_ENTRY, naga::ShaderStage::Fragment)?;

    // Varyings: fragment inputs must be a subset of vertex outputs.
    let mut produced = Vec::new();
    if let Some(result) = &vs.function.result {
        collect_locations(&vertex.module, result.ty, result.binding.as_ref(), &mut produced);
    }
    let mut consumed = Vec::new();
    for arg in &fs.function.arguments {
        collect_locations(&fragment.module, arg.ty, arg.binding.as_ref(), &mut consumed);
    }
    if let Some(missing) = consumed.iter().find(|loc| !produced.contains(loc)) {
        return Err(format!(
            "fragment input @location({missing}) is not written by the vertex stage"
        ));
    }

    let position = vs
        .function
        .arguments
        .iter()
        .find(|arg| arg.name.as_deref() == Some(POSITION_ATTRIBUTE))
        .ok_or_else(|| format!("vertex attribute `{POSITION_ATTRIBUTE}` not found"))?;
    let position_location = match position.binding {
        Some(naga::Binding::Location { location, .. }) => location,
        _ => return Err(format!("`{POSITION_ATTRIBUTE}` is not a located vertex input")),
    };
    if !is_vec2_f32(&vertex.module, position.ty) {
        return Err(format!("`{POSITION_ATTRIBUTE}` must be vec2<f32>"));
    }

    let resolution = uniform_slot(RESOLUTION_UNIFORM, vertex, fragment)?;
    let color = uniform_slot(COLOR_UNIFORM, vertex, fragment)?;

    let mut groups = [resolution.group, color.group];
    groups.sort_unstable();
    if groups != [0, 1] {
        return Err(format!(
            "`{RESOLUTION_UNIFORM}` and `{COLOR_UNIFORM}` must occupy bind groups 0 and 1, found {} and {}",
            resolution.group, color.group
        ));
    }

    Ok(ProgramLayout {
        position: position_location,
        resolution,
        color,
    })
}

fn entry_point<'m>(
    module: &'m naga::Module,
    name: &str,
    stage: naga::ShaderStage,
) -> Result<&'m naga::EntryPoint, String> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.name == name && ep.stage == stage)
        .ok_or_else(|| format!("entry point `{name}` ({stage:?}) not found"))
}

/// Collects user `@location`s of a value, descending into struct members.
fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<u32>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => out.push(*location),
        Some(naga::Binding::BuiltIn(_)) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

fn is_vec2_f32(module: &naga::Module, ty: naga::Handle<naga::Type>) -> bool {
    matches!(
        module.types[ty].inner,
        naga::TypeInner::Vector { size: naga::VectorSize::Bi, scalar } if scalar == naga::Scalar::F32
    )
}

/// Finds uniform `name` in either stage. Declaring it in both is fine as long
/// as the slots agree.
fn uniform_slot(
    name: &str,
    vertex: &CompiledShader,
    fragment: &CompiledShader,
) -> Result<BindingSlot, String> {
    let find = |module: &naga::Module| {
        module.global_variables.iter().find_map(|(_, var)| {
            let is_match = var.name.as_deref() == Some(name)
                && matches!(var.space, naga::AddressSpace::Uniform);
            is_match
                .then_some(var.binding.as_ref())
                .flatten()
                .map(|rb| BindingSlot {
                    group: rb.group,
                    binding: rb.binding,
                })
        })
    };

    match (find(&vertex.module), find(&fragment.module)) {
        (Some(a), Some(b)) if a != b => Err(format!(
            "uniform `{name}` is bound at {}/{} in the vertex stage but {}/{} in the fragment stage",
            a.group, a.binding, b.group, b.binding
        )),
        (Some(slot), _) | (None, Some(slot)) => Ok(slot),
        (None, None) => Err(format!("uniform `{name}` not found in either stage")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERT: &str = include_str!("shaders/landscape.vert.wgsl");
    const FRAG: &str = include_str!("shaders/landscape.frag.wgsl");

    // ── bundled program ───────────────────────────────────────────────────

    #[test]
    fn landscape_program_links() {
        let program = LinkedProgram::landscape().unwrap();
        let layout = program.layout();
        assert_eq!(layout.position, 0);
        assert_eq!(layout.resolution, BindingSlot { group: 0, binding: 0 });
        assert_eq!(layout.color, BindingSlot { group: 1, binding: 0 });
    }

    #[test]
    fn linked_program_keeps_sources() {
        let program = ProgramBuilder::new(VERT, FRAG).build().unwrap();
        assert_eq!(program.vertex().source(), VERT);
        assert_eq!(program.fragment().stage(), ShaderStage::Fragment);
    }

    // ── compile failures ──────────────────────────────────────────────────

    #[test]
    fn syntax_error_reports_diagnostic() {
        let err = compile_shader(ShaderStage::Vertex, "fn vs_main( -> {").unwrap_err();
        match &err {
            ProgramError::Compile { stage, diagnostic } => {
                assert_eq!(*stage, ShaderStage::Vertex);
                assert!(!diagnostic.trim().is_empty());
            }
            other => panic!("expected compile error, got {other:?}"),
        }
    }

    #[test]
    fn type_error_fails_validation() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
        let err = compile_shader(ShaderStage::Fragment, src).unwrap_err();
        assert!(matches!(err, ProgramError::Compile { stage: ShaderStage::Fragment, .. }));
        assert!(!err.diagnostic().is_empty());
    }

    #[test]
    fn build_with_broken_fragment_fails_without_panicking() {
        let err = ProgramBuilder::new(VERT, "this is not wgsl").build().unwrap_err();
        assert!(matches!(err, ProgramError::Compile { stage: ShaderStage::Fragment, .. }));
    }

    #[test]
    fn stage_without_matching_entry_point_is_rejected() {
        let err = compile_shader(ShaderStage::Vertex, FRAG).unwrap_err();
        assert!(err.diagnostic().contains("vertex entry point"));
    }

    // ── link failures ─────────────────────────────────────────────────────

    #[test]
    fn unmatched_varying_fails_to_link() {
        let frag = "@fragment fn fs_main(@location(3) c: vec4<f32>) -> @location(0) vec4<f32> { return c; }";
        let err = ProgramBuilder::new(VERT, frag).build().unwrap_err();
        match err {
            ProgramError::Link { reason } => assert!(reason.contains("@location(3)")),
            other => panic!("expected link error, got {other:?}"),
        }
    }

    #[test]
    fn missing_color_uniform_fails_to_link() {
        let vert = r#"
            struct Resolution { size: vec2<f32>, padding: vec2<f32> };
            @group(0) @binding(0) var<uniform> resolution: Resolution;
            @vertex
            fn vs_main(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(position / resolution.size, 0.0, 1.0);
            }
        "#;
        let frag = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        let err = ProgramBuilder::new(vert, frag).build().unwrap_err();
        assert!(err.diagnostic().contains("`color`"));
    }

    #[test]
    fn wrong_entry_point_name_fails_to_link() {
        let frag = FRAG.replace("fs_main", "main_fs");
        let err = ProgramBuilder::new(VERT, &frag).build().unwrap_err();
        assert!(matches!(err, ProgramError::Link { .. }));
        assert!(err.diagnostic().contains(FRAGMENT_ENTRY));
    }

    #[test]
    fn uniforms_sharing_a_group_fail_to_link() {
        let vert = VERT.replace(
            "@group(1) @binding(0) var<uniform> color",
            "@group(0) @binding(1) var<uniform> color",
        );
        let err = ProgramBuilder::new(&vert, FRAG).build().unwrap_err();
        assert!(matches!(err, ProgramError::Link { .. }));
    }
}
