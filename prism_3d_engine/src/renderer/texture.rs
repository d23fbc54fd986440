/// Texture trait

/// A texture that can be bound to a texture unit
///
/// Image decoding is not the engine's concern; backends create textures from
/// raw pixels supplied by the application.
pub trait Texture {
    /// Backend object name
    fn id(&self) -> u32;

    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Bind to texture unit `unit` (0-based)
    fn bind(&self, unit: u32);
}
