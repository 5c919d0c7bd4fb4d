//! Ohajiki headless demo
//!
//! Builds a scene, flicks the first piece and logs where everything ends up.
//! A real host renders `Stage` and forwards pointer events instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ohajiki (headless) starting...");

    let config = load_config(std::env::args().nth(1));
    let mut scene = match ohajiki::sim::FlickScene::new(config) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Cannot build scene: {e}");
            std::process::exit(1);
        }
    };

    if let Some(first) = scene.pieces().first().copied() {
        flick(&mut scene, first.entity);
    }

    let frames = (scene.config().frames_per_second * 2.0).round() as u32;
    for _ in 0..frames {
        scene.update();
    }
    log::info!(
        "Simulated {} frames ({:.2}s)",
        scene.driver().frame_count(),
        frames as f32 * scene.config().frame_dt()
    );

    for piece in scene.pieces() {
        if let Some(visual) = scene.stage().visual(piece.entity) {
            log::info!(
                "{:?}: center ({:.1}, {:.1}) angle {:.1} deg",
                piece.entity,
                visual.position.x,
                visual.position.y,
                visual.angle_degrees()
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive FlickScene from their own event loop
}

/// Read a JSON scene config, falling back to defaults when absent or invalid
#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: Option<String>) -> ohajiki::SceneConfig {
    let Some(path) = path else {
        return ohajiki::SceneConfig::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| ohajiki::SceneConfig::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(config) => {
            log::info!("Loaded config from {path}");
            config
        }
        Err(e) => {
            log::warn!("Ignoring config {path}: {e}; using defaults");
            ohajiki::SceneConfig::default()
        }
    }
}

/// Pull back from the piece's center and let go, like a player would
#[cfg(not(target_arch = "wasm32"))]
fn flick(scene: &mut ohajiki::sim::FlickScene, piece: ohajiki::sim::EntityId) {
    use glam::Vec2;
    use ohajiki::consts::ARROW_SPRITE_SIZE;

    let Some(visual) = scene.stage().visual(piece).cloned() else {
        return;
    };
    let pull = Vec2::new(-60.0, 20.0);

    let result = scene
        .on_drag_start(piece, visual.local_center())
        .and_then(|anchor| {
            let origin = scene.driver().units().vec_to_display(anchor);
            scene.on_drag_move(piece, origin + pull / 2.0)?;
            if let Some(arrow) = scene.stage().indicators().next() {
                log::info!(
                    "Aiming: arrow {:.1}px at {:.1} deg (sprite scale {:.2})",
                    arrow.length,
                    arrow.angle_degrees(),
                    arrow.scale_for(ARROW_SPRITE_SIZE)
                );
            }
            scene.on_drag_end(piece, origin + pull)
        });

    match result {
        Ok(launch) => log::info!(
            "Flicked {:?} with impulse ({:.2}, {:.2})",
            piece,
            launch.impulse.x,
            launch.impulse.y
        ),
        Err(e) => log::warn!("Flick rejected: {e}"),
    }
}
