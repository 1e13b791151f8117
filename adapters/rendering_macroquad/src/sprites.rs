use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use arena_survivors_rendering::SpriteKey;
use glam::Vec2;
use macroquad::{
    color::WHITE,
    math::Vec2 as MacroquadVec2,
    texture::{self, DrawTextureParams, Texture2D},
};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Cache of textures loaded from a sprite manifest.
#[derive(Debug)]
pub(crate) struct SpriteAtlas {
    textures: HashMap<SpriteKey, Texture2D>,
}

impl SpriteAtlas {
    /// Loads sprites from the manifest located at the provided path.
    pub(crate) fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest_with_loader(path, default_loader)
    }

    /// Draws the sprite so it covers the circle at `center` with `radius`.
    pub(crate) fn draw(&self, key: SpriteKey, center: Vec2, radius: f32) -> Result<()> {
        let texture = *self
            .textures
            .get(&key)
            .with_context(|| format!("sprite {key:?} missing from atlas"))?;

        let diameter = radius * 2.0;
        let draw_params = DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(diameter, diameter)),
            ..DrawTextureParams::default()
        };
        texture::draw_texture_ex(
            texture,
            center.x - radius,
            center.y - radius,
            WHITE,
            draw_params,
        );

        Ok(())
    }

    /// Returns the number of textures stored in the atlas.
    pub(crate) fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        mut loader: impl FnMut(SpriteKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read sprite manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        Self::from_entries(entries, &mut loader)
    }

    fn from_entries(
        entries: Vec<(SpriteKey, PathBuf)>,
        loader: &mut impl FnMut(SpriteKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut textures = HashMap::with_capacity(entries.len());
        for (key, path) in entries {
            let texture = loader(key, &path).with_context(|| {
                format!("failed to load sprite {key:?} from {}", path.display())
            })?;
            if textures.insert(key, texture).is_some() {
                bail!("duplicate sprite entry for {key:?}");
            }
        }
        Ok(Self { textures })
    }
}

fn default_loader(_key: SpriteKey, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    sprites: HashMap<String, String>,
}

/// Parses a manifest into entries ordered like `SpriteKey::ALL`.
///
/// Every key must be listed exactly once and unknown names are rejected.
fn parse_manifest(contents: &str, base_path: &Path) -> Result<Vec<(SpriteKey, PathBuf)>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = HashMap::new();
    let mut unknown = Vec::new();
    for (name, relative_path) in manifest.sprites {
        let Some(key) = SpriteKey::from_manifest_name(&name) else {
            unknown.push(name);
            continue;
        };
        let _ = resolved.insert(key, base_path.join(relative_path));
    }
    if !unknown.is_empty() {
        unknown.sort();
        bail!(
            "sprite manifest contains unknown keys: {}",
            unknown.join(", ")
        );
    }

    let mut ordered = Vec::with_capacity(SpriteKey::ALL.len());
    for key in SpriteKey::ALL {
        let Some(path) = resolved.remove(&key) else {
            bail!(
                "sprite manifest missing entry for `{}`",
                key.manifest_name()
            );
        };
        ordered.push((key, path));
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, path::Path};

    const FULL_MANIFEST: &str = r#"
        version = 1

        [sprites]
        tank = "enemies/tank.png"
        warrior = "classes/warrior.png"
        mage = "classes/mage.png"
        assassin = "classes/assassin.png"
        ranger = "classes/ranger.png"
        normal = "enemies/normal.png"
        fast = "enemies/fast.png"
    "#;

    #[test]
    fn parse_manifest_requires_all_known_keys() {
        let manifest = r#"
            version = 1

            [sprites]
            warrior = "classes/warrior.png"
            normal = "enemies/normal.png"
        "#;

        let error = parse_manifest(manifest, Path::new("assets")).expect_err("incomplete");
        assert!(error.to_string().contains("missing entry for `mage`"));
    }

    #[test]
    fn manifest_rejects_unknown_keys() {
        let manifest = format!("{FULL_MANIFEST}\n        dragon = \"dragon.png\"\n");

        let error = parse_manifest(&manifest, Path::new("assets")).expect_err("unknown key");
        assert!(error.to_string().contains("dragon"));
    }

    #[test]
    fn manifest_rejects_other_versions() {
        let manifest = FULL_MANIFEST.replace("version = 1", "version = 2");

        assert!(parse_manifest(&manifest, Path::new("assets")).is_err());
    }

    #[test]
    fn manifest_resolves_paths_relative_to_base_directory() {
        let parsed = parse_manifest(FULL_MANIFEST, Path::new("root")).expect("manifest parses");

        assert_eq!(parsed.len(), SpriteKey::ALL.len());
        assert_eq!(
            parsed[0],
            (SpriteKey::Warrior, PathBuf::from("root/classes/warrior.png"))
        );
        assert_eq!(
            parsed[6],
            (SpriteKey::TankEnemy, PathBuf::from("root/enemies/tank.png"))
        );
    }

    #[test]
    fn atlas_loads_textures_using_deterministic_order() {
        let entries =
            parse_manifest(FULL_MANIFEST, Path::new("assets")).expect("manifest should parse");
        let load_order = RefCell::new(Vec::new());
        let atlas = SpriteAtlas::from_entries(entries, &mut |key, _| {
            load_order.borrow_mut().push(key);
            Ok(Texture2D::empty())
        })
        .expect("atlas should load using provided loader");

        assert_eq!(load_order.borrow().as_slice(), &SpriteKey::ALL);
        assert_eq!(atlas.texture_count(), SpriteKey::ALL.len());
    }

    #[test]
    fn atlas_surfaces_loader_failures() {
        let entries = vec![(SpriteKey::Mage, PathBuf::from("missing.png"))];
        let error = SpriteAtlas::from_entries(entries, &mut |_, _| bail!("no such file"))
            .expect_err("loader failure must propagate");

        assert!(error.to_string().contains("failed to load sprite Mage"));
    }
    #[test]
    fn drawing_a_missing_sprite_reports_the_key() {
        let entries = vec![(SpriteKey::Mage, PathBuf::from("mage.png"))];
        let atlas = SpriteAtlas::from_entries(entries, &mut |_, _| Ok(Texture2D::empty()))
            .expect("partial atlas loads");

        let drawn = atlas.draw(SpriteKey::TankEnemy, Vec2::ZERO, 10.0);
        let error = drawn.expect_err("tank sprite is missing");
        assert!(error.to_string().contains("TankEnemy"));
    }
}
