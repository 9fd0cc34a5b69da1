//! Texture loading and load-failure detection

use std::path::{Path, PathBuf};

use anyhow::bail;
use bevy::asset::LoadState;
use bevy::asset::io::file::FileAssetReader;
use bevy::image::ImageLoaderSettings;
use bevy::prelude::*;
use bevy::render::render_resource::TextureFormat;

use crate::config::{SystemConfig, TextureConfig};

/// Directory under the base path that holds assets, as given to `AssetPlugin`
pub const ASSET_DIR: &str = "assets";

/// Handles for every image the scene binds into materials
#[derive(Resource, Debug, Clone)]
pub struct TextureSet {
    pub primary_diffuse: Handle<Image>,
    pub primary_bump: Handle<Image>,
    pub primary_specular: Handle<Image>,
    pub satellite_diffuse: Handle<Image>,
}

impl TextureSet {
    fn entries(&self) -> [(&'static str, &Handle<Image>); 4] {
        [
            ("primary diffuse", &self.primary_diffuse),
            ("primary bump", &self.primary_bump),
            ("primary specular", &self.primary_specular),
            ("satellite diffuse", &self.satellite_diffuse),
        ]
    }
}

/// Aggregate load state of the texture set
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum TextureStatus {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

/// Start loading every texture. Data maps are read as linear, not sRGB.
pub fn load_textures(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<SystemConfig>,
) {
    let paths = &config.textures;
    let linear = |settings: &mut ImageLoaderSettings| settings.is_srgb = false;

    commands.insert_resource(TextureSet {
        primary_diffuse: asset_server.load(paths.primary_diffuse.clone()),
        primary_bump: asset_server.load_with_settings(paths.primary_bump.clone(), linear),
        primary_specular: asset_server.load_with_settings(paths.primary_specular.clone(), linear),
        satellite_diffuse: asset_server.load(paths.satellite_diffuse.clone()),
    });
    info!("Loading textures: {}", paths.paths().join(", "));
}

/// Aggregate load state of the whole set. Any failure wins.
pub fn texture_status_with(
    textures: &TextureSet,
    load_state: impl Fn(&Handle<Image>) -> Option<LoadState>,
) -> TextureStatus {
    let mut ready = true;
    for (label, handle) in textures.entries() {
        match load_state(handle) {
            Some(LoadState::Failed(err)) => {
                let path = handle
                    .path()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                return TextureStatus::Failed(format!("{label} texture {path}: {err}"));
            }
            Some(LoadState::Loaded) => {}
            _ => ready = false,
        }
    }

    if ready {
        TextureStatus::Ready
    } else {
        TextureStatus::Pending
    }
}

pub fn texture_status(asset_server: &AssetServer, textures: &TextureSet) -> TextureStatus {
    texture_status_with(textures, |handle| asset_server.get_load_state(handle.id()))
}

/// Track texture loading. The specular map is inverted once, on the
/// transition to `Ready`, so shiny texels end up smooth in the roughness slot.
pub fn poll_texture_loads(
    asset_server: Res<AssetServer>,
    textures: Option<Res<TextureSet>>,
    mut images: ResMut<Assets<Image>>,
    mut status: ResMut<TextureStatus>,
) {
    let Some(textures) = textures else {
        return;
    };
    let current = texture_status(&asset_server, &textures);
    if *status == current {
        return;
    }

    if current == TextureStatus::Ready && !invert_specular_map(&mut images, &textures.primary_specular)
    {
        warn!("Specular map has an unsupported pixel format; using it as-is");
    }
    *status = current;
}

/// Abort while still loading if any texture failed
pub fn exit_on_texture_failure(status: Res<TextureStatus>, mut exit: MessageWriter<AppExit>) {
    if !status.is_changed() {
        return;
    }
    if let TextureStatus::Failed(reason) = &*status {
        error!("Failed to load {}", reason);
        exit.write(AppExit::error());
    }
}

/// Invert the color channels of RGBA8 pixel data, leaving alpha alone
pub fn invert_rgb(data: &mut [u8]) {
    for pixel in data.chunks_exact_mut(4) {
        for channel in &mut pixel[..3] {
            *channel = u8::MAX - *channel;
        }
    }
}

/// Turn a specular map into a roughness map in place.
/// Returns false if the pixel format is not 8-bit RGBA or single-channel.
pub fn invert_specular_map(images: &mut Assets<Image>, handle: &Handle<Image>) -> bool {
    let Some(image) = images.get_mut(handle) else {
        return false;
    };
    let format = image.texture_descriptor.format;
    let Some(data) = image.data.as_mut() else {
        return false;
    };

    match format {
        TextureFormat::Rgba8Unorm | TextureFormat::Rgba8UnormSrgb => invert_rgb(data),
        TextureFormat::R8Unorm => data.iter_mut().for_each(|v| *v = u8::MAX - *v),
        _ => return false,
    }
    true
}

/// Asset directory as the asset server resolves it
pub fn asset_root() -> PathBuf {
    FileAssetReader::get_base_path().join(ASSET_DIR)
}

/// Check every configured texture exists before the app starts
pub fn verify_texture_files(config: &TextureConfig, asset_root: &Path) -> anyhow::Result<()> {
    let missing: Vec<String> = config
        .paths()
        .iter()
        .map(|path| asset_root.join(path))
        .filter(|path| !path.is_file())
        .map(|path| path.display().to_string())
        .collect();

    if !missing.is_empty() {
        bail!("missing texture file(s): {}", missing.join(", "));
    }
    Ok(())
}
