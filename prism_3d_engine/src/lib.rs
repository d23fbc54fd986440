/*!
# Prism 3D Engine

Scene rendering and shader-configuration core of the Prism 3D engine.

The crate is graphics-API agnostic: objects are drawn through the
`GraphicsDevice`, `Shader`, `Framebuffer` and `Texture` traits, which a
backend crate (e.g. `prism_3d_engine_renderer_gl`) implements.

## Architecture

- **Scene**: nodes placing shared objects and lights, cameras, the draw pass
- **SceneObject / SceneMesh**: drawable objects owning their GPU buffers
- **ShaderConfiguration**: named uniform values batched per kind
- **ShaderManager**: shader registry with per-frame configuration tracking
- **MeshData / Material**: CPU-side geometry and surface properties
- **Camera / InputState**: fly camera driven by keyboard and mouse

Everything runs on the render thread; shared state uses `Rc`/`RefCell`.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod renderer;
pub mod resource;
pub mod shading;
pub mod scene;
pub mod camera;
pub mod input;
pub mod utils;

// Main prism3d namespace module
pub mod prism3d {
    // Error types
    pub use crate::error::{Error, Result, log_error};

    // Logging facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only; the engine_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
    }

    // Backend traits and descriptors
    pub mod render {
        pub use crate::renderer::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    pub mod shading {
        pub use crate::shading::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod input {
        pub use crate::input::*;
    }

    pub mod utils {
        pub use crate::utils::{IdAllocator, NodeId};
    }
}

// Re-export math and windowing libraries at crate root
pub use glam;
pub use winit;
