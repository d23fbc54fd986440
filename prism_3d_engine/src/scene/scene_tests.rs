/// Tests for Scene
///
/// These tests validate node and camera management, the scene-level
/// uniforms (camera, point lights, directional light) and the draw pass
/// routing through the mock backend.

use super::*;
use crate::renderer::mock_graphics_device::{
    new_call_log, CallLog, MockFramebuffer, MockGraphicsDevice, MockShader, UniformValue,
};
use crate::renderer::{BufferUsage, Framebuffer, PrimitiveTopology, ShaderId};
use crate::resource::{MeshData, PositionVertex};
use crate::scene::SceneMesh;
use crate::shading::ShaderManager;
use glam::Mat4;
use winit::keyboard::KeyCode;

const SHADER: ShaderId = 1;

// ============================================================================
// Helper Functions
// ============================================================================

struct Fixture {
    log: CallLog,
    device: MockGraphicsDevice,
    shaders: ShaderManager,
    shader: Rc<MockShader>,
    framebuffers: FramebufferMap,
}

fn fixture() -> Fixture {
    let log = new_call_log();
    let device = MockGraphicsDevice::with_log(log.clone());
    let shader = Rc::new(MockShader::with_log(SHADER, "lit", log.clone()));
    let mut shaders = ShaderManager::new();
    shaders.register_shader(shader.clone());

    let mut framebuffers = FramebufferMap::default();
    let framebuffer: Rc<dyn Framebuffer> = Rc::new(MockFramebuffer::new(7, log.clone()));
    framebuffers.insert(SHADER, framebuffer);

    Fixture { log, device, shaders, shader, framebuffers }
}

fn create_object(f: &mut Fixture, shader_id: ShaderId, name: &str) -> SharedObject {
    let data = Rc::new(MeshData::with_indices(
        vec![PositionVertex::default(); 3],
        vec![0, 1, 2],
    ));
    let mut mesh = SceneMesh::new(&mut f.device, data, BufferUsage::StaticDraw, PrimitiveTopology::Triangles)
        .unwrap();
    mesh.set_shader_id(shader_id);
    mesh.set_debug_name(name);
    Rc::new(RefCell::new(mesh))
}

fn draw_scene(f: &mut Fixture, scene: &Scene, configuration: &mut ShaderConfiguration) -> Result<()> {
    f.log.borrow_mut().clear();
    let mut ctx = DrawContext::new(&mut f.device, &mut f.shaders);
    scene.draw(&mut ctx, configuration, &f.framebuffers)
}

fn new_scene() -> Scene {
    Scene::with_default_camera(Rc::new(IdAllocator::new()))
}

// ============================================================================
// Nodes
// ============================================================================

#[test]
fn test_default_camera() {
    let scene = new_scene();

    assert_eq!(scene.camera_count(), 1);
    assert_eq!(scene.active_camera().position(), Vec3::new(0.0, 0.0, -3.0));
    assert!(scene.active_camera().view_direction().abs_diff_eq(Vec3::Z, 1.0e-6));
}

#[test]
fn test_node_ids_increase_across_kinds() {
    let mut f = fixture();
    let mut scene = new_scene();

    let object = scene.add_object(create_object(&mut f, SHADER, "a"));
    let point = scene.add_point_light(Rc::new(PointLight::default()));
    let directional = scene.add_directional_light(Rc::new(DirectionalLight::default()));

    assert!(object < point);
    assert!(point < directional);
    assert_eq!(scene.object_count(), 1);
    assert_eq!(scene.point_light_count(), 1);
    assert_eq!(scene.directional_light_count(), 1);
}

#[test]
fn test_scenes_sharing_allocator_never_collide() {
    let ids = Rc::new(IdAllocator::new());
    let mut a = Scene::with_default_camera(ids.clone());
    let mut b = Scene::with_default_camera(ids.clone());

    let first = a.add_point_light(Rc::new(PointLight::default()));
    let second = b.add_point_light(Rc::new(PointLight::default()));

    assert_ne!(first, second);
    assert_eq!(ids.allocated(), 2);
    assert!(Rc::ptr_eq(a.ids(), b.ids()));
}

#[test]
fn test_same_object_in_two_nodes() {
    let mut f = fixture();
    let mut scene = new_scene();
    let object = create_object(&mut f, SHADER, "tree");

    let a = scene.add_object(object.clone());
    let b = scene.add_object(object.clone());
    scene.object_node_mut(b).unwrap().set_position(Vec3::X);

    assert_ne!(a, b);
    assert!(Rc::ptr_eq(scene.object_node(a).unwrap().object(), scene.object_node(b).unwrap().object()));
    assert_eq!(scene.object_node(a).unwrap().position(), Vec3::ZERO);
}

#[test]
fn test_remove_object_keeps_order() {
    let mut f = fixture();
    let mut scene = new_scene();
    let a = scene.add_object(create_object(&mut f, SHADER, "a"));
    let b = scene.add_object(create_object(&mut f, SHADER, "b"));
    let c = scene.add_object(create_object(&mut f, SHADER, "c"));

    let removed = scene.remove_object(b).unwrap();

    assert_eq!(removed.id(), b);
    let order: Vec<NodeId> = scene.object_nodes().iter().map(|node| node.id()).collect();
    assert_eq!(order, vec![a, c]);
    assert!(scene.remove_object(b).is_none());
}

#[test]
fn test_lookup_unknown_node() {
    let mut scene = new_scene();
    let light = scene.add_point_light(Rc::new(PointLight::default()));

    assert!(scene.object_node(light).is_none());
    assert!(scene.directional_light_node(light).is_none());
    assert!(scene.point_light_node(light).is_some());
}

// ============================================================================
// Cameras
// ============================================================================

#[test]
fn test_add_camera_does_not_activate() {
    let mut scene = new_scene();
    let initial = scene.active_camera_key();

    let key = scene.add_camera(Camera::new(Vec3::ONE, Vec3::Y, Vec3::ZERO));

    assert_eq!(scene.active_camera_key(), initial);
    assert_eq!(scene.camera(key).unwrap().position(), Vec3::ONE);
    assert_eq!(scene.camera_count(), 2);
}

#[test]
fn test_set_active_camera() {
    let mut scene = new_scene();

    let key = scene.set_active_camera(Camera::new(Vec3::ONE, Vec3::Y, Vec3::ZERO));

    assert_eq!(scene.active_camera_key(), key);
    assert_eq!(scene.active_camera().position(), Vec3::ONE);
}

#[test]
fn test_activate_camera() {
    let mut scene = new_scene();
    let initial = scene.active_camera_key();
    scene.set_active_camera(Camera::new(Vec3::ONE, Vec3::Y, Vec3::ZERO));

    scene.activate_camera(initial).unwrap();

    assert_eq!(scene.active_camera_key(), initial);
}

#[test]
fn test_activate_unknown_camera_fails() {
    let mut scene = new_scene();
    let initial = scene.active_camera_key();

    let result = scene.activate_camera(CameraKey::default());

    assert!(matches!(result, Err(Error::InvalidReference(_))));
    assert_eq!(scene.active_camera_key(), initial);
}

// ============================================================================
// Input
// ============================================================================

#[test]
fn test_forward_moves_along_view_direction() {
    let mut scene = new_scene();

    scene.process_input(&[KeyCode::KeyW][..]);

    let position = scene.active_camera().position();
    assert!(position.abs_diff_eq(Vec3::new(0.0, 0.0, -2.9), 1.0e-5));
}

#[test]
fn test_backward_and_strafe() {
    let mut scene = new_scene();
    let u = scene.active_camera().u();

    scene.process_input(&[KeyCode::KeyS, KeyCode::KeyD][..]);

    let moved = scene.active_camera().position() - Vec3::new(0.0, 0.0, -3.0);
    let expected = (scene.active_camera().w() + u) * 0.1;
    assert!(moved.abs_diff_eq(expected, 1.0e-5));
}

#[test]
fn test_left_and_right_cancel() {
    let mut scene = new_scene();

    scene.process_input(&[KeyCode::KeyA, KeyCode::KeyD][..]);

    assert!(scene.active_camera().position().abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), 1.0e-6));
}

#[test]
fn test_other_keys_do_not_move() {
    let mut scene = new_scene();
    let before = scene.active_camera().clone();

    scene.process_input(&[KeyCode::Space, KeyCode::KeyQ][..]);

    assert_eq!(*scene.active_camera(), before);
}

#[test]
fn test_mouse_rotates_active_camera_only() {
    let mut scene = new_scene();
    let first = scene.active_camera_key();
    scene.set_active_camera(Camera::new(Vec3::ONE, Vec3::Y, Vec3::ZERO));

    scene.process_mouse(10.0, 0.0);

    assert!((scene.active_camera().yaw() + 0.01).abs() < 1.0e-6);
    assert_eq!(scene.camera(first).unwrap().yaw(), 0.0);
}

// ============================================================================
// Scene Configuration
// ============================================================================

#[test]
fn test_camera_uniforms() {
    let scene = new_scene();
    let mut configuration = ShaderConfiguration::new();

    scene.write_scene_configuration(&mut configuration);

    let camera = scene.active_camera();
    assert_eq!(configuration.get_mat4("view"), camera.view_matrix());
    assert_eq!(configuration.get_vec3("camera_position"), camera.position());
    assert_eq!(configuration.get_vec3("camera_view_dir"), -camera.w());
}

#[test]
fn test_three_point_lights() {
    let mut scene = new_scene();
    for i in 0..3 {
        let light = Rc::new(PointLight::new(Vec3::splat(i as f32), 10.0 + i as f32));
        let id = scene.add_point_light(light);
        scene.point_light_node_mut(id).unwrap().set_position(Vec3::new(i as f32, 1.0, 0.0));
    }
    let mut configuration = ShaderConfiguration::new();

    scene.write_scene_configuration(&mut configuration);

    assert_eq!(configuration.get_uint("pointLight_count"), 3);
    for i in 0..3 {
        assert_eq!(
            configuration.get_vec3(&format!("pointLight_position[{}]", i)),
            Vec3::new(i as f32, 1.0, 0.0)
        );
        assert_eq!(configuration.get_vec3(&format!("pointLight_color[{}]", i)), Vec3::splat(i as f32));
        assert_eq!(configuration.get_float(&format!("pointLight_power[{}]", i)), 10.0 + i as f32);
    }
    assert!(!configuration.has_vec3("pointLight_position[3]"));
}

#[test]
fn test_no_point_lights_writes_zero_count() {
    let scene = new_scene();
    let mut configuration = ShaderConfiguration::new();

    scene.write_scene_configuration(&mut configuration);

    assert_eq!(configuration.get_uint("pointLight_count"), 0);
}

#[test]
fn test_no_directional_light() {
    let scene = new_scene();
    let mut configuration = ShaderConfiguration::new();

    scene.write_scene_configuration(&mut configuration);

    assert!(configuration.has_bool("useDirectionalLight"));
    assert!(!configuration.get_bool("useDirectionalLight"));
    assert!(!configuration.has_vec3("directionalLight_direction"));
    assert!(!configuration.has_float("directionalLight_power"));
}

#[test]
fn test_only_first_directional_light_contributes() {
    let mut scene = new_scene();
    scene.add_directional_light(Rc::new(DirectionalLight::new(0.5)));
    scene.add_directional_light(Rc::new(DirectionalLight::new(9.0)));
    let mut configuration = ShaderConfiguration::new();

    scene.write_scene_configuration(&mut configuration);

    assert!(configuration.get_bool("useDirectionalLight"));
    assert_eq!(configuration.get_float("directionalLight_power"), 0.5);
    assert_eq!(configuration.get_vec3("directionalLight_direction"), Vec3::new(0.0, -1.0, 0.0));
}

#[test]
fn test_directional_light_follows_node_rotation() {
    let mut scene = new_scene();
    let id = scene.add_directional_light(Rc::new(DirectionalLight::default()));
    let node = scene.directional_light_node_mut(id).unwrap();
    node.set_position(Vec3::new(5.0, 5.0, 5.0));
    node.rotate_deg(Vec3::Z, 90.0);
    let mut configuration = ShaderConfiguration::new();

    scene.write_scene_configuration(&mut configuration);

    let direction = configuration.get_vec3("directionalLight_direction");
    assert!(direction.abs_diff_eq(Vec3::X, 1.0e-6));
}

// ============================================================================
// Draw
// ============================================================================

#[test]
fn test_draw_binds_framebuffer_then_draws() {
    let mut f = fixture();
    let mut scene = new_scene();
    scene.add_object(create_object(&mut f, SHADER, "a"));

    draw_scene(&mut f, &scene, &mut ShaderConfiguration::new()).unwrap();

    let calls = f.device.calls();
    let bind = calls.iter().position(|c| c == "bind_framebuffer 7").unwrap();
    let draw = calls.iter().position(|c| c.starts_with("draw_indexed")).unwrap();
    assert!(bind < draw);
}

#[test]
fn test_objects_without_framebuffer_are_skipped() {
    let mut f = fixture();
    let mut scene = new_scene();
    f.shaders.register_shader(Rc::new(MockShader::new(2, "unmapped")));
    scene.add_object(create_object(&mut f, 2, "hidden"));
    scene.add_object(create_object(&mut f, SHADER, "visible"));

    draw_scene(&mut f, &scene, &mut ShaderConfiguration::new()).unwrap();

    assert_eq!(f.device.calls_matching("draw_indexed").len(), 1);
    assert_eq!(f.device.calls_matching("use_program"), vec![format!("use_program {}", SHADER)]);
}

#[test]
fn test_object_receives_model_uniforms() {
    let mut f = fixture();
    let mut scene = new_scene();
    let id = scene.add_object(create_object(&mut f, SHADER, "a"));
    scene.object_node_mut(id).unwrap().set_position(Vec3::new(1.0, 2.0, 3.0));

    draw_scene(&mut f, &scene, &mut ShaderConfiguration::new()).unwrap();

    let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(f.shader.last("model"), Some(UniformValue::Mat4(model)));
    assert_eq!(
        f.shader.last("model_normal"),
        Some(UniformValue::Mat3(Mat3::from_mat4(model.inverse().transpose())))
    );
}

#[test]
fn test_scene_configuration_once_per_frame() {
    let mut f = fixture();
    let mut scene = new_scene();
    scene.add_object(create_object(&mut f, SHADER, "a"));
    scene.add_object(create_object(&mut f, SHADER, "b"));
    let mut configuration = ShaderConfiguration::new();

    draw_scene(&mut f, &scene, &mut configuration).unwrap();
    assert_eq!(f.shader.count("view"), 1);
    assert_eq!(f.shader.count("model"), 2);

    draw_scene(&mut f, &scene, &mut configuration).unwrap();
    assert_eq!(f.shader.count("view"), 2);
    assert_eq!(f.shader.count("model"), 4);
}

#[test]
fn test_scene_configuration_precedes_object_configuration() {
    let mut f = fixture();
    let mut scene = new_scene();
    scene.add_object(create_object(&mut f, SHADER, "a"));

    draw_scene(&mut f, &scene, &mut ShaderConfiguration::new()).unwrap();

    let names = f.shader.names();
    let view = names.iter().position(|n| n == "view").unwrap();
    let model = names.iter().position(|n| n == "model").unwrap();
    assert!(view < model);
}

#[test]
fn test_caller_configuration_is_kept() {
    let mut f = fixture();
    let mut scene = new_scene();
    scene.add_object(create_object(&mut f, SHADER, "a"));
    let mut configuration = ShaderConfiguration::new();
    configuration.set_mat4("projection", Mat4::IDENTITY);

    draw_scene(&mut f, &scene, &mut configuration).unwrap();

    assert!(configuration.has_bool("useDirectionalLight"));
    assert_eq!(f.shader.last("projection"), Some(UniformValue::Mat4(Mat4::IDENTITY)));
}

#[test]
fn test_draw_unregistered_shader_fails() {
    let mut f = fixture();
    let mut scene = new_scene();
    let framebuffer: Rc<dyn Framebuffer> = Rc::new(MockFramebuffer::new(8, f.log.clone()));
    f.framebuffers.insert(42, framebuffer);
    scene.add_object(create_object(&mut f, 42, "orphan"));

    let result = draw_scene(&mut f, &scene, &mut ShaderConfiguration::new());

    assert!(matches!(result, Err(Error::InvalidReference(_))));
}

#[test]
fn test_draw_with_object_borrowed_mutably_fails() {
    let mut f = fixture();
    let mut scene = new_scene();
    let object = create_object(&mut f, SHADER, "busy");
    scene.add_object(object.clone());
    let _guard = object.borrow_mut();

    let result = draw_scene(&mut f, &scene, &mut ShaderConfiguration::new());

    assert!(matches!(result, Err(Error::BackendError(_))));
}

#[test]
fn test_empty_scene_draws_nothing() {
    let mut f = fixture();
    let scene = new_scene();
    let mut configuration = ShaderConfiguration::new();

    draw_scene(&mut f, &scene, &mut configuration).unwrap();

    assert!(f.device.calls().is_empty());
    assert_eq!(configuration.get_uint("pointLight_count"), 0);
}
