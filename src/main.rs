//! Helix Portal entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_portal {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, KeyboardEvent, MouseEvent};

    use helix_portal::audio::{AudioManager, Mix, SoundEvent, pan_for_position};
    use helix_portal::layout::{GalleryItem, layout_helix};
    use helix_portal::particles::{
        ParticleShape, ParticleSpec, SpeedClass, WindDrift, generate_particles,
    };
    use helix_portal::platform::{self, HapticEvent, haptics};
    use helix_portal::portal::{PortalEvent, PortalState, Screen};
    use helix_portal::renderer::dom;
    use helix_portal::settings::Settings;

    /// Portal instance holding all state
    struct App {
        state: PortalState,
        settings: Settings,
        audio: AudioManager,
        rng: Pcg32,
        items: Vec<GalleryItem>,
        /// Burst size override from the deep link
        burst_override: Option<usize>,
        start_ms: f64,
        /// A user gesture has unlocked audio playback
        audio_armed: bool,
        tab_hidden: bool,
    }

    fn particle_layer(screen: Screen) -> &'static str {
        match screen {
            Screen::Gateway => "gateway-particles",
            Screen::Scanner => "scanner-particles",
            Screen::Vault => "vault-particles",
        }
    }

    impl App {
        fn new(settings: Settings, link: platform::DeepLink, now_ms: f64) -> Self {
            let mut audio = AudioManager::new();
            audio.set_mix(settings.mix());
            Self {
                state: PortalState::new(link.reality),
                items: link.reality.gallery_items(),
                settings,
                audio,
                rng: Pcg32::seed_from_u64(now_ms as u64),
                burst_override: link.particles,
                start_ms: now_ms,
                audio_armed: false,
                tab_hidden: false,
            }
        }

        fn wind(&self, now_ms: f64) -> WindDrift {
            WindDrift::at((now_ms - self.start_ms) / 1000.0)
        }

        fn feedback(&self, sound: SoundEvent, haptic: HapticEvent) {
            self.audio.play(sound);
            haptics::vibrate(haptic, self.settings.haptics);
        }

        /// Sample and mount a particle layer
        fn burst(&mut self, layer: &str, spec: ParticleSpec, now_ms: f64) {
            let wind = self.wind(now_ms);
            match generate_particles(&spec, &mut self.rng, &wind) {
                Ok(trajectories) => dom::spawn_particles(layer, &trajectories, spec.color),
                Err(e) => log::warn!("Particle burst skipped: {}", e),
            }
        }

        /// Start or stop the drone to match settings and tab visibility
        fn sync_ambient(&mut self) {
            if self.audio_armed && self.settings.ambient_wanted(self.tab_hidden) {
                self.audio.start_ambient();
            } else {
                self.audio.stop_ambient();
            }
        }

        /// Gateway sigil pressed
        fn press_gateway(&mut self, now_ms: f64) {
            if !self.state.accepts_gateway_press() {
                return;
            }
            self.audio.resume();
            self.audio_armed = true;
            self.sync_ambient();
            self.feedback(SoundEvent::HeavyPress, HapticEvent::HeavyPress);

            let count = self
                .burst_override
                .filter(|_| self.settings.particles && !self.settings.reduced_motion)
                .unwrap_or_else(|| self.settings.burst_count());
            let accent = self.state.reality.meta().accent;
            self.burst("gateway-particles", ParticleSpec::burst(count, accent), now_ms);

            if let Err(e) = self.state.enter_portal(now_ms) {
                log::warn!("Portal press ignored: {}", e);
            }
        }

        fn go_home(&mut self, now_ms: f64) {
            if self.state.screen == Screen::Gateway {
                // Escape on the gateway aborts a pending entry
                if self.state.cancel() {
                    log::info!("Portal entry cancelled");
                }
                return;
            }
            self.feedback(SoundEvent::Click, HapticEvent::Tap);
            if let Err(e) = self.state.return_home(now_ms) {
                log::warn!("Return ignored: {}", e);
            }
        }

        /// Quality toggle: apply the next preset and persist it
        fn cycle_quality(&mut self, _now_ms: f64) {
            let preset = self.settings.cycle_quality();
            self.settings.save();
            self.sync_ambient();
            dom::set_text("quality-label", preset.as_str());
            log::info!("Quality preset: {}", preset.as_str());
        }

        fn unlock(&mut self, now_ms: f64) {
            if let Some(event) = self.state.unlock_vault() {
                self.handle_event(event, now_ms);
            }
        }

        fn show_vault(&mut self, now_ms: f64) {
            let helix = self.settings.effective_helix();
            match layout_helix(&self.items, &helix) {
                Ok(placements) => dom::mount_vault("vault-track", &self.items, &placements, &helix),
                Err(e) => log::error!("Vault layout failed: {}", e),
            }

            let meta = self.state.reality.meta();
            let spec = ParticleSpec::hover(self.settings.hover_count(), meta.accent, meta.hover_profile);
            self.burst("vault-particles", spec, now_ms);
        }

        fn handle_event(&mut self, event: PortalEvent, now_ms: f64) {
            match event {
                PortalEvent::ScreenChanged { from, to } => {
                    dom::clear_particles(particle_layer(from));
                    dom::show_screen(to);
                    self.feedback(SoundEvent::ModeSwitch, HapticEvent::ModeSwitch);
                    match to {
                        Screen::Scanner => haptics::vibrate(HapticEvent::ScanPulse, self.settings.haptics),
                        Screen::Vault => self.show_vault(now_ms),
                        Screen::Gateway => self.audio.set_environment_intensity(0.5),
                    }
                }
                PortalEvent::VaultUnlocked => {
                    self.feedback(SoundEvent::Unlock, HapticEvent::Unlock);
                    self.audio.set_environment_intensity(1.0);
                    let spec = ParticleSpec::burst(
                        self.settings.unlock_count(),
                        self.state.reality.meta().accent,
                    )
                    .with_shape(ParticleShape::Diamond)
                    .with_speed(SpeedClass::Fast);
                    self.burst("vault-particles", spec, now_ms);
                }
            }
        }

        /// Poll pending transitions
        fn update(&mut self, now_ms: f64) {
            if let Some(event) = self.state.advance(now_ms) {
                self.handle_event(event, now_ms);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Helix Portal starting...");

        let now = js_sys::Date::now();
        let link = platform::deeplink::from_location();
        let settings = Settings::load();
        let app = Rc::new(RefCell::new(App::new(settings, link, now)));

        {
            let app = app.borrow();
            let meta = app.state.reality.meta();
            dom::set_text("reality-title", meta.title);
            dom::set_text("reality-tagline", meta.tagline);
            dom::show_screen(Screen::Gateway);
            log::info!("Reality: {} ({} relics)", app.state.reality.as_str(), app.items.len());
        }

        if link.open_vault {
            app.borrow_mut().press_gateway(now);
        }

        setup_gateway(app.clone());
        setup_buttons(app.clone());
        setup_keyboard(app.clone());
        setup_visibility(app.clone());

        request_animation_frame(app);

        log::info!("Helix Portal running!");
    }

    fn on_click(id: &str, app: Rc<RefCell<App>>, handler: fn(&mut App, f64)) {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        else {
            log::warn!("#{} not found", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            handler(&mut app.borrow_mut(), js_sys::Date::now());
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_gateway(app: Rc<RefCell<App>>) {
        on_click("gateway-sigil", app.clone(), App::press_gateway);

        let Some(card) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("gateway-card"))
        else {
            return;
        };

        // Tilt follows the pointer; pan follows it across the viewport
        {
            let app = app.clone();
            let card_el: Element = card.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let width = web_sys::window()
                    .and_then(|w| w.inner_width().ok())
                    .and_then(|w| w.as_f64())
                    .unwrap_or(0.0) as f32;
                a.audio
                    .set_spatial_position(pan_for_position(event.client_x() as f32, width));

                if !a.settings.effective_card_tilt() {
                    return;
                }
                let size = Vec2::new(card_el.client_width() as f32, card_el.client_height() as f32);
                let pointer = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                a.state.set_pointer(pointer, size);
                dom::apply_tilt(&card_el, a.state.tilt);
            });
            let _ = card.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let card_el: Element = card.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.state.clear_pointer();
                a.audio.set_spatial_position(0.0);
                dom::apply_tilt(&card_el, a.state.tilt);
            });
            let _ = card.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        on_click("vault-lock", app.clone(), App::unlock);
        on_click("home-btn", app.clone(), App::go_home);
        on_click("scanner-abort", app.clone(), App::go_home);
        on_click("fullscreen-btn", app.clone(), |a, _now| {
            a.feedback(SoundEvent::Click, HapticEvent::Tap);
            let on = platform::fullscreen::toggle();
            log::info!("Fullscreen: {}", on);
        });
        on_click("quality-btn", app, App::cycle_quality);
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let now = js_sys::Date::now();
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                " " | "Enter" => a.press_gateway(now),
                "Escape" => a.go_home(now),
                "u" | "U" => a.unlock(now),
                "f" | "F" => {
                    platform::fullscreen::toggle();
                }
                "q" | "Q" => a.cycle_quality(now),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_visibility(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
            a.tab_hidden = hidden;
            a.sync_ambient();
            if !a.settings.mute_on_blur {
                return;
            }
            let mix = Mix {
                muted: hidden,
                ..a.settings.mix()
            };
            a.audio.set_mix(mix);
            log::info!("Audio {} (tab visibility)", if hidden { "muted" } else { "restored" });
        });
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>) {
        app.borrow_mut().update(js_sys::Date::now());
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_portal::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Helix Portal (native) starting...");
    log::info!("The portal itself runs in the browser - run with `trunk serve` for the web version");

    if let Err(e) = dump_layouts() {
        log::error!("Layout dump failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Print each reality's helix and a sample burst, for eyeballing tuning changes
#[cfg(not(target_arch = "wasm32"))]
fn dump_layouts() -> helix_portal::Result<()> {
    use helix_portal::particles::{NoDrift, ParticleSpec, generate_particles};
    use helix_portal::{HelixParams, RealityId, layout_helix};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    let params = HelixParams::default();
    for reality in RealityId::ALL {
        let items = reality.gallery_items();
        let placements = layout_helix(&items, &params)?;
        println!("\n{} ({})", reality.meta().title, reality.as_str());
        for (item, p) in items.iter().zip(&placements) {
            println!(
                "  {:<20} strand {:?}  x {:>7.1}  y {:>7.1}  scale {:.3}  alpha {:.3}  z {:>3}",
                item.title, p.strand, p.horizontal_offset, p.vertical_position, p.scale, p.opacity, p.z_order
            );
        }
    }

    let spec = ParticleSpec::burst(5, RealityId::Nexus.meta().accent);
    let burst = generate_particles(&spec, &mut Pcg32::seed_from_u64(42), &NoDrift)?;
    let json = serde_json::to_string_pretty(&burst)
        .map_err(|e| helix_portal::PortalError::invalid("burst", e.to_string()))?;
    println!("\nSample burst (seed 42):\n{json}");
    Ok(())
}
