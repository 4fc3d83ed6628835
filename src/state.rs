use crate::storage::KeyValueStore;
use crate::tracker::Tracker;
use crate::view::ViewState;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type SharedTracker = Tracker<Box<dyn KeyValueStore>>;

/// Everything one page render needs: persisted data plus transient flags.
pub struct App {
    pub tracker: SharedTracker,
    pub view: ViewState,
}

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Mutex<App>>,
}

impl AppState {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        let store: Box<dyn KeyValueStore> = Box::new(store);
        Self {
            app: Arc::new(Mutex::new(App {
                tracker: Tracker::load(store),
                view: ViewState::default(),
            })),
        }
    }
}
