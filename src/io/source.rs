// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background photo sources.
//!
//! Supplies a decoded background photo either by fetching from a
//! weighted list of random-photo generator URLs or by decoding a
//! user-selected local file. Selection probability is proportional to a
//! generator's integer weight, implemented by expanding the list so each
//! entry appears `weight` times and choosing uniformly.

use crate::render::compositor::FRAME_SIZE;
use anyhow::{bail, Context, Result};
use image::RgbaImage;
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;
use std::time::Duration;

/// A random-photo generator endpoint with a selection weight.
#[derive(Debug, Clone)]
pub struct Generator {
    pub url: String,
    pub weight: u32,
}

/// The built-in generator list: mostly single people, sometimes groups.
pub fn default_generators() -> Vec<Generator> {
    vec![
        Generator {
            url: generator_url("people"),
            weight: 10,
        },
        Generator {
            url: generator_url("group"),
            weight: 5,
        },
    ]
}

/// Templated endpoint URL for the frame's pixel size and a category keyword.
fn generator_url(keyword: &str) -> String {
    format!("https://source.unsplash.com/{FRAME_SIZE}x{FRAME_SIZE}?{keyword}")
}

/// Pick a generator URL with probability proportional to its weight.
pub fn pick_weighted<'a, R: Rng>(generators: &'a [Generator], rng: &mut R) -> Option<&'a str> {
    let expanded: Vec<&str> = generators
        .iter()
        .flat_map(|g| std::iter::repeat(g.url.as_str()).take(g.weight as usize))
        .collect();
    expanded.choose(rng).copied()
}

/// Fetch and decode a random photo. One retry on a network failure,
/// then the error is surfaced.
pub fn fetch_random(generators: &[Generator]) -> Result<RgbaImage> {
    let url = pick_weighted(generators, &mut rand::thread_rng())
        .context("generator list is empty")?
        .to_string();

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(20))
        .build()
        .context("failed to build HTTP client")?;

    let bytes = match download(&client, &url) {
        Ok(bytes) => bytes,
        Err(first) => {
            log::warn!("Fetch from {} failed ({}), retrying once", url, first);
            download(&client, &url).context("random photo fetch failed after retry")?
        }
    };

    let image = image::load_from_memory(&bytes)
        .context("failed to decode fetched photo")?
        .to_rgba8();
    log::info!("Fetched {}x{} photo from {}", image.width(), image.height(), url);
    Ok(image)
}

fn download(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

/// Decode a user-selected file, rejecting anything whose declared media
/// type is not `image/*` before touching the contents.
pub fn load_file(path: &Path) -> Result<RgbaImage> {
    let media_type = media_type_for(path);
    match media_type {
        Some(t) if t.starts_with("image/") => {}
        _ => bail!(
            "{} is not an image file (media type {:?})",
            path.display(),
            media_type
        ),
    }

    let image = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgba8();
    log::info!(
        "Loaded {}x{} image from {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(image)
}

/// Declared media type from the file extension.
fn media_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let media_type = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "json" => "application/json",
        "yaml" | "yml" => "application/yaml",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(media_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;

    #[test]
    fn test_generator_url_carries_size_and_keyword() {
        let url = generator_url("people");
        assert!(url.contains("800x800"));
        assert!(url.ends_with("?people"));
    }

    #[test]
    fn test_weighted_pick_matches_weights() {
        let generators = default_generators();
        let mut rng = StdRng::seed_from_u64(7);

        let draws = 30_000;
        let mut people = 0usize;
        for _ in 0..draws {
            let url = pick_weighted(&generators, &mut rng).unwrap();
            if url.ends_with("people") {
                people += 1;
            }
        }

        // weight 10 of 15 total -> 2/3 expected.
        let frequency = people as f64 / draws as f64;
        assert!(
            (frequency - 2.0 / 3.0).abs() < 0.02,
            "frequency {frequency} too far from 2/3"
        );
    }

    #[test]
    fn test_weighted_pick_empty_list() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(pick_weighted(&[], &mut rng).is_none());
    }

    #[test]
    fn test_load_file_rejects_non_image_media_type() {
        let err = load_file(&PathBuf::from("notes.txt")).unwrap_err();
        assert!(err.to_string().contains("not an image"));

        let err = load_file(&PathBuf::from("scene.yaml")).unwrap_err();
        assert!(err.to_string().contains("not an image"));
    }

    #[test]
    fn test_media_type_detection() {
        assert_eq!(media_type_for(&PathBuf::from("a.JPG")), Some("image/jpeg"));
        assert_eq!(media_type_for(&PathBuf::from("a.png")), Some("image/png"));
        assert_eq!(media_type_for(&PathBuf::from("a.txt")), Some("text/plain"));
        assert_eq!(media_type_for(&PathBuf::from("a")), None);
        assert_eq!(media_type_for(&PathBuf::from("a.xyz")), None);
    }
}
