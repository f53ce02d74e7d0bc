/// WGSL shader for the textured room lit by a single point light.
pub const ROOM_SHADER: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    model: mat4x4<f32>,
    light_pos: vec4<f32>,
    view_pos: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var surface_texture: texture_2d<f32>;
@group(1) @binding(1)
var surface_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = uniforms.model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (uniforms.model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.projection * uniforms.view * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize(world_normal);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(surface_texture, surface_sampler, in.uv);
    let normal = normalize(in.world_normal);
    let light_dir = normalize(uniforms.light_pos.xyz - in.world_pos);
    let view_dir = normalize(uniforms.view_pos.xyz - in.world_pos);

    let ambient = 0.25;
    let diffuse = max(dot(normal, light_dir), 0.0);
    let reflected = reflect(-light_dir, normal);
    let specular = pow(max(dot(view_dir, reflected), 0.0), 32.0) * 0.3;

    let distance = length(uniforms.light_pos.xyz - in.world_pos);
    let attenuation = 1.0 / (1.0 + 0.045 * distance + 0.0075 * distance * distance);

    let lit = base.rgb * (ambient + diffuse * attenuation) + vec3<f32>(specular * attenuation);
    return vec4<f32>(lit, base.a);
}
"#;
