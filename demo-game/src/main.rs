use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use stagehand_base::{
    LoadSceneParams, SceneAccessor, SceneInstance, ScenePath, ScenePathReference,
    UnloadSceneOptions,
};
use stagehand_registry::{SceneAccessorResolver, SceneLoadOp, SceneLoaderIO, SceneRegistry};

struct LoadWork {
    load_op: SceneLoadOp,
    instance: SceneInstance,
}

// Stand-in for a real streaming subsystem: "loads" every scene on a worker
// thread after a short delay, then completes the op from that thread.
struct SlowLoaderIO {
    work_tx: Sender<LoadWork>,
    next_instance: AtomicU64,
}

impl SlowLoaderIO {
    fn new() -> Self {
        let (work_tx, work_rx) = crossbeam_channel::unbounded::<LoadWork>();
        std::thread::spawn(move || {
            while let Ok(work) = work_rx.recv() {
                std::thread::sleep(Duration::from_millis(250));
                work.load_op.complete(work.instance);
            }
        });

        SlowLoaderIO {
            work_tx,
            next_instance: AtomicU64::new(1),
        }
    }
}

impl SceneLoaderIO for SlowLoaderIO {
    fn begin_load(
        &self,
        path: &ScenePath,
        params: LoadSceneParams,
        load_op: SceneLoadOp,
    ) {
        log::debug!("begin_load {:?} {:?}", path, params);
        let instance = SceneInstance(self.next_instance.fetch_add(1, Ordering::Relaxed));
        self.work_tx
            .send(LoadWork { load_op, instance })
            .expect("loader worker thread is gone");
    }

    fn begin_unload(
        &self,
        instance: SceneInstance,
        options: UnloadSceneOptions,
    ) {
        log::debug!("begin_unload {:?} {:?}", instance, options);
    }
}

struct HudAccessor;

impl SceneAccessor for HudAccessor {
    fn on_scene_did_load(&self) {
        println!("HudAccessor: scene did load");
    }

    fn on_scene_will_unload(&self) {
        println!("HudAccessor: scene will unload");
    }
}

// Pretends every scene's content contains the one demo accessor
struct DemoResolver {
    accessor: Arc<HudAccessor>,
}

impl SceneAccessorResolver for DemoResolver {
    fn resolve(
        &self,
        _instance: SceneInstance,
    ) -> Option<Arc<dyn SceneAccessor>> {
        Some(self.accessor.clone())
    }
}

fn main() {
    // Setup logging
    env_logger::Builder::default()
        .write_style(env_logger::WriteStyle::Always)
        .filter_level(log::LevelFilter::Debug)
        .init();

    let registry = SceneRegistry::new(
        Box::new(SlowLoaderIO::new()),
        Box::new(DemoResolver {
            accessor: Arc::new(HudAccessor),
        }),
    );

    let notifications = registry.subscribe();

    let hub = ScenePath::from("levels/hub");
    let hud = ScenePath::from(&ScenePathReference::new("Hud", "ui/hud"));

    registry.load_scene(&hub, None);
    registry.load_scene(&hud, None);

    while !registry.is_loaded(&hub) || !registry.is_loaded(&hud) {
        std::thread::sleep(Duration::from_millis(15));
        registry.update();

        for path in registry.active_scenes() {
            if registry.is_loaded(&path) {
                println!("{} loaded", path);
            } else {
                println!("{} not loaded", path);
            }
        }
    }

    while let Ok(event) = notifications.try_recv() {
        println!("notification: {:?}", event);
    }

    registry.unload_scene(&hub, None);
    registry.unload_scene(&hud, None);
    registry.update();

    while let Ok(event) = notifications.try_recv() {
        println!("notification: {:?}", event);
    }

    println!("scenes still tracked: {}", registry.active_scenes().len());
}
