//! Mounting vault cards and particle layers into the page

use web_sys::{Document, Element};

use super::style::{particle_style, placement_style, tilt_style};
use crate::color::Color;
use crate::layout::{GalleryItem, HelixParams, HelixPlacement};
use crate::particles::ParticleTrajectory;
use crate::portal::Screen;

const SCREENS: [Screen; 3] = [Screen::Gateway, Screen::Scanner, Screen::Vault];

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn clear(el: &Element) {
    el.set_inner_html("");
}

/// Show exactly one screen
pub fn show_screen(screen: Screen) {
    let Some(document) = document() else { return };
    for s in SCREENS {
        if let Some(el) = document.get_element_by_id(s.as_str()) {
            let class = if s == screen {
                "screen active"
            } else {
                "screen hidden"
            };
            let _ = el.set_attribute("class", class);
        }
    }
}

/// Replace the vault track with one card per item
pub fn mount_vault(
    container_id: &str,
    items: &[GalleryItem],
    placements: &[HelixPlacement],
    params: &HelixParams,
) {
    let Some(document) = document() else { return };
    let Some(container) = document.get_element_by_id(container_id) else {
        log::warn!("Vault container #{} missing", container_id);
        return;
    };
    clear(&container);
    let _ = container.set_attribute(
        "style",
        &format!("height: {:.0}px;", params.content_height(items.len())),
    );

    for (item, placement) in items.iter().zip(placements) {
        let Ok(card) = document.create_element("div") else {
            continue;
        };
        let _ = card.set_attribute(
            "class",
            &format!("vault-card strand-{}", placement.strand.as_str()),
        );
        let _ = card.set_attribute("data-id", &item.id);
        let _ = card.set_attribute(
            "style",
            &format!(
                "{} --accent: {};",
                placement_style(placement),
                item.color.to_hex()
            ),
        );

        if let Ok(img) = document.create_element("img") {
            let _ = img.set_attribute("src", &item.image);
            let _ = img.set_attribute("alt", &item.title);
            let _ = img.set_attribute("loading", "lazy");
            let _ = card.append_child(&img);
        }
        if let Ok(title) = document.create_element("span") {
            let _ = title.set_attribute("class", "vault-title");
            title.set_text_content(Some(item.title.as_str()));
            let _ = card.append_child(&title);
        }

        let _ = container.append_child(&card);
    }

    log::info!("Mounted {} vault cards", items.len());
}

/// Replace a particle layer's contents with fresh particles
pub fn spawn_particles(layer_id: &str, trajectories: &[ParticleTrajectory], color: Color) {
    let Some(document) = document() else { return };
    let Some(layer) = document.get_element_by_id(layer_id) else {
        return;
    };
    clear(&layer);

    for t in trajectories {
        let Ok(particle) = document.create_element("span") else {
            continue;
        };
        let _ = particle.set_attribute("class", "particle");
        let _ = particle.set_attribute("style", &particle_style(t, color));
        let _ = layer.append_child(&particle);
    }
}

/// Drop every particle in a layer (screen deactivated)
pub fn clear_particles(layer_id: &str) {
    if let Some(layer) = document().and_then(|d| d.get_element_by_id(layer_id)) {
        clear(&layer);
    }
}

pub fn apply_tilt(el: &Element, tilt: glam::Vec2) {
    let _ = el.set_attribute("style", &tilt_style(tilt));
}

/// Write a reality's title and tagline into the gateway
pub fn set_text(id: &str, text: &str) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
        el.set_text_content(Some(text));
    }
}
