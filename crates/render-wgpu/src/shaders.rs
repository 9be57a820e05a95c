/// Maximum number of directional lights the mesh shader evaluates.
pub const MAX_LIGHTS: usize = 4;

/// WGSL shader for instanced meshes lit by directional lights.
pub const MESH_SHADER: &str = r#"
struct DirectionalLight {
    // xyz: unit vector toward the light
    direction: vec4<f32>,
    // rgb: color premultiplied by intensity
    color: vec4<f32>,
};

struct Uniforms {
    view_proj: mat4x4<f32>,
    lights: array<DirectionalLight, 4>,
    light_count: vec4<u32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    var radiance = vec3<f32>(0.0);
    for (var i = 0u; i < uniforms.light_count.x; i = i + 1u) {
        let light = uniforms.lights[i];
        let diffuse = max(dot(n, light.direction.xyz), 0.0);
        radiance = radiance + light.color.rgb * diffuse;
    }
    return vec4<f32>(in.color.rgb * radiance, in.color.a);
}
"#;
