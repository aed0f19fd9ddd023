use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::MullionError;

/// Embedded WGSL sources keyed by their repository-relative path.
const SHADER_SOURCES: &[(&str, &str)] = &[
    (
        "screen/blit.wgsl",
        include_str!("../../assets/shaders/screen/blit.wgsl"),
    ),
    (
        "raster/boundary_lines.wgsl",
        include_str!("../../assets/shaders/raster/boundary_lines.wgsl"),
    ),
    (
        "raster/pane_triangle.wgsl",
        include_str!("../../assets/shaders/raster/pane_triangle.wgsl"),
    ),
];

/// Shared module definition: (source, file path).
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules importable via `#import mullion::<name>`.
const SHARED_MODULES: &[ModuleDef] = &[ModuleDef {
    source: include_str!("../../assets/shaders/modules/fullscreen.wgsl"),
    file_path: "modules/fullscreen.wgsl",
}];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time; consuming shaders
/// pull them in with `#import mullion::fullscreen`. The composer produces
/// `naga::Module` IR directly, skipping a WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Build a composer with all shared modules registered.
    ///
    /// # Errors
    ///
    /// Returns [`MullionError::ShaderCompose`] if a shared module fails to
    /// register (malformed embedded source).
    pub fn new() -> Result<Self, MullionError> {
        let mut composer = Composer::default();
        for module in SHARED_MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: module.source,
                    file_path: module.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    MullionError::ShaderCompose(format!(
                        "shared module '{}': {e}",
                        module.file_path
                    ))
                })?;
        }
        Ok(Self { composer })
    }

    /// Compose the shader at `path` into a `wgpu::ShaderModule` ready for
    /// pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`MullionError::ShaderCompose`] for an unknown path or a
    /// composition failure.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        path: &str,
    ) -> Result<wgpu::ShaderModule, MullionError> {
        let module = self.compose_naga(path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
        }))
    }

    /// Compose the shader at `path` into a `naga::Module` without touching a
    /// GPU device. Used by tests to validate every shader headlessly.
    ///
    /// # Errors
    ///
    /// Returns [`MullionError::ShaderCompose`] for an unknown path or a
    /// composition failure.
    pub fn compose_naga(
        &mut self,
        path: &str,
    ) -> Result<naga::Module, MullionError> {
        let source = SHADER_SOURCES
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, s)| *s)
            .ok_or_else(|| {
                MullionError::ShaderCompose(format!("unknown shader '{path}'"))
            })?;
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path: path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                MullionError::ShaderCompose(format!("'{path}': {e}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for (path, _) in SHADER_SOURCES {
            composer.compose_naga(path).unwrap_or_else(|e| {
                panic!("shader '{path}' failed to compose: {e}")
            });
        }
    }

    #[test]
    fn unknown_shader_path_is_an_error() {
        let mut composer = ShaderComposer::new().unwrap();
        assert!(matches!(
            composer.compose_naga("screen/missing.wgsl"),
            Err(MullionError::ShaderCompose(_))
        ));
    }
}
