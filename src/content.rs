//! Descriptive content for the info panel.
//!
//! Lookups run on the async compute task pool and are polled once per frame,
//! so a slow provider never stalls rendering. Successful results are cached by body
//! name; failures are not, so a retry asks the provider again.

use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task, TaskPool, block_on, poll_once};

use crate::orrery::Orrery;
use crate::types::FrameSet;

/// Title, blurb and quick facts for one body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyContent {
    pub title: String,
    pub description: String,
    pub facts: Vec<String>,
    /// Further reading.
    pub url: String,
}

impl BodyContent {
    /// Placeholder for bodies without catalogued content.
    pub fn placeholder(body: &str) -> Self {
        Self {
            title: body.to_string(),
            description: "No detailed information available.".to_string(),
            facts: Vec::new(),
            url: String::new(),
        }
    }
}

/// Content lookup failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("content for {body} is unavailable: {reason}")]
    Unavailable { body: String, reason: String },
}

/// Source of body content.
pub trait ContentProvider: Send + Sync + 'static {
    fn fetch(&self, body: &str) -> Result<BodyContent, ContentError>;
}

/// Built-in descriptions of the Sun and the eight planets.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticCatalog;

impl ContentProvider for StaticCatalog {
    fn fetch(&self, body: &str) -> Result<BodyContent, ContentError> {
        Ok(catalog_entry(body).unwrap_or_else(|| BodyContent::placeholder(body)))
    }
}

fn entry(title: &str, description: &str, facts: [&str; 4], url: &str) -> BodyContent {
    BodyContent {
        title: title.to_string(),
        description: description.to_string(),
        facts: facts.iter().map(|fact| fact.to_string()).collect(),
        url: url.to_string(),
    }
}

fn catalog_entry(body: &str) -> Option<BodyContent> {
    let content = match body {
        "Sun" => entry(
            "The Sun",
            "A yellow dwarf star whose gravity holds the planets, moons and debris of the system in orbit.",
            [
                "Surface temperature: 5,778 K",
                "Age: about 4.6 billion years",
                "Mass: 333,000 Earths",
                "Composition: 73% hydrogen, 25% helium",
            ],
            "https://science.nasa.gov/sun/",
        ),
        "Mercury" => entry(
            "Mercury",
            "The smallest planet and the closest to the Sun, with almost no atmosphere and huge swings in temperature.",
            [
                "Distance from Sun: 58 million km",
                "Day length: 59 Earth days",
                "Year length: 88 Earth days",
                "Temperature: -173°C to 427°C",
            ],
            "https://science.nasa.gov/mercury/",
        ),
        "Venus" => entry(
            "Venus",
            "Close to Earth in size and mass, but wrapped in a dense carbon dioxide atmosphere that makes it the hottest planet.",
            [
                "Surface temperature: 462°C",
                "Surface pressure: 90 times Earth's",
                "Day length: 243 Earth days",
                "Atmosphere: 96% carbon dioxide",
            ],
            "https://science.nasa.gov/venus/",
        ),
        "Earth" => entry(
            "Earth",
            "The only planet known to host life, with liquid surface water and a protective atmosphere.",
            [
                "Age: 4.54 billion years",
                "Surface: 71% water",
                "Atmosphere: 78% nitrogen, 21% oxygen",
                "Moons: 1",
            ],
            "https://science.nasa.gov/earth/",
        ),
        "Mars" => entry(
            "Mars",
            "The red planet owes its colour to iron oxide dust and hosts Olympus Mons, the largest volcano in the system.",
            [
                "Day length: 24 h 37 min",
                "Moons: Phobos and Deimos",
                "Olympus Mons: 21 km high",
                "Average temperature: -62°C",
            ],
            "https://science.nasa.gov/mars/",
        ),
        "Jupiter" => entry(
            "Jupiter",
            "The largest planet, a gas giant whose Great Red Spot is a storm wider than Earth.",
            [
                "Mass: more than all other planets combined",
                "Moons: 95+ known",
                "Great Red Spot: observed for 400+ years",
                "Day length: 9 h 56 min",
            ],
            "https://science.nasa.gov/jupiter/",
        ),
        "Saturn" => entry(
            "Saturn",
            "Famous for its bright rings of ice and rock, and less dense than water.",
            [
                "Rings: ice and rock particles",
                "Moons: 146+ known, including Titan",
                "Density: 0.687 g/cm³",
                "Hexagonal storm at the north pole",
            ],
            "https://science.nasa.gov/saturn/",
        ),
        "Uranus" => entry(
            "Uranus",
            "An ice giant that rotates on its side, probably after an ancient collision.",
            [
                "Axial tilt: 98°",
                "Composition: water, methane and ammonia ices",
                "Rings: 13 known",
                "Year length: 84 Earth years",
            ],
            "https://science.nasa.gov/uranus/",
        ),
        "Neptune" => entry(
            "Neptune",
            "The outermost planet, a deep blue ice giant with the fastest winds in the system.",
            [
                "Wind speeds: up to 2,100 km/h",
                "Colour: methane in the atmosphere",
                "Largest moon: Triton, on a retrograde orbit",
                "First planet found by prediction",
            ],
            "https://science.nasa.gov/neptune/",
        ),
        _ => return None,
    };
    Some(content)
}

/// Progress of the content lookup for the selected body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ContentState {
    #[default]
    Idle,
    Loading(String),
    Ready(BodyContent),
    Failed { body: String, error: ContentError },
}

struct PendingLookup {
    body: String,
    task: Task<Result<BodyContent, ContentError>>,
}

/// Content cache plus the in-flight lookup, if any.
#[derive(Resource)]
pub struct ContentLibrary {
    provider: Arc<dyn ContentProvider>,
    cache: HashMap<String, BodyContent>,
    state: ContentState,
    pending: Option<PendingLookup>,
}

impl Default for ContentLibrary {
    fn default() -> Self {
        Self::new(StaticCatalog)
    }
}

impl ContentLibrary {
    pub fn new(provider: impl ContentProvider) -> Self {
        Self {
            provider: Arc::new(provider),
            cache: HashMap::new(),
            state: ContentState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> &ContentState {
        &self.state
    }

    pub fn cached(&self, body: &str) -> Option<&BodyContent> {
        self.cache.get(body)
    }

    /// Start looking up `body`, replacing any lookup for another body.
    pub fn request(&mut self, body: &str) {
        if let Some(content) = self.cache.get(body) {
            self.pending = None;
            self.state = ContentState::Ready(content.clone());
            return;
        }
        if self.pending.as_ref().is_some_and(|p| p.body == body) {
            return;
        }

        let provider = Arc::clone(&self.provider);
        let name = body.to_string();
        // Dropping the task cancels it, so a replaced lookup never lands.
        let task = AsyncComputeTaskPool::get_or_init(TaskPool::default)
            .spawn(async move { provider.fetch(&name) });

        self.pending = Some(PendingLookup {
            body: body.to_string(),
            task,
        });
        self.state = ContentState::Loading(body.to_string());
        info!("Looking up content for {body}");
    }

    /// Collect a finished lookup without blocking.
    pub fn poll(&mut self) {
        let Some(pending) = &mut self.pending else {
            return;
        };
        let Some(result) = block_on(poll_once(&mut pending.task)) else {
            return;
        };
        let body = std::mem::take(&mut pending.body);
        self.pending = None;

        match result {
            Ok(content) => {
                self.cache.insert(body, content.clone());
                self.state = ContentState::Ready(content);
            }
            Err(error) => {
                warn!("Content lookup failed: {error}");
                self.state = ContentState::Failed { body, error };
            }
        }
    }

    /// Ask again for a body whose lookup failed.
    pub fn retry(&mut self) {
        if let ContentState::Failed { body, .. } = &self.state {
            let body = body.clone();
            self.request(&body);
        }
    }

    /// Drop the current selection; the cache is kept.
    pub fn clear(&mut self) {
        self.pending = None;
        self.state = ContentState::Idle;
    }
}

/// UI request to repeat a failed lookup.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct RetryContent;

/// Plugin keeping content in step with the focused body.
pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContentLibrary>()
            .add_message::<RetryContent>()
            .add_systems(
                Update,
                (track_selection, retry_content, poll_content)
                    .chain()
                    .after(FrameSet::Commands)
                    .before(FrameSet::Sync),
            );
    }
}

/// Request content when the focused body changes.
fn track_selection(
    orrery: Res<Orrery>,
    mut library: ResMut<ContentLibrary>,
    mut last: Local<Option<String>>,
) {
    let focused = orrery.focus_state().name();
    if last.as_deref() == focused {
        return;
    }

    match focused {
        Some(body) => library.request(body),
        None => library.clear(),
    }
    *last = focused.map(str::to_owned);
}

fn retry_content(mut retries: MessageReader<RetryContent>, mut library: ResMut<ContentLibrary>) {
    if retries.read().count() > 0 {
        library.retry();
    }
}

fn poll_content(mut library: ResMut<ContentLibrary>) {
    library.poll();
}
