//! Background loop bridging user navigation commands and the data layer.
//!
//! Commands go in on a channel, listing events come out on another; the
//! reconciler in between guarantees the emitted views always reflect the
//! latest committed navigation. Queued commands are drained before each
//! fetch and again before a result is adopted, so two quick navigations
//! settle on the later one even though fetches run one at a time.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread::JoinHandle;

use tonedex_types::CategoryCount;

use crate::config::ListingConfig;
use crate::error::{Error, Result};
use crate::reconciler::{NavigationIntent, NavigationRequest, Observation, Reconciler};
use crate::source::{CountsSource, PageSource};
use crate::view::ListingView;

#[derive(Debug)]
pub enum ListingCommand {
    Navigate(NavigationIntent),
    Shutdown,
}

#[derive(Debug)]
pub enum ListingEvent {
    /// A navigation was committed; `query` is what the URL now carries.
    NavigationCommitted { seq: u64, query: String },
    /// A new render-ready snapshot (loading or settled).
    ViewUpdated { view: Box<ListingView> },
    /// A page arrived for a superseded navigation and was ignored.
    StaleResultDiscarded { seq: u64 },
    /// The data layer failed; recovery belongs to the host's error boundary.
    FatalError(String),
}

pub struct RuntimeConfig {
    pub source: Arc<dyn PageSource>,
    pub counts: Arc<dyn CountsSource>,
    pub listing: ListingConfig,
    /// Query string of the URL the listing was entered on.
    pub initial_query: String,
}

pub struct ListingRuntime {
    commands: Sender<ListingCommand>,
    rx: Receiver<ListingEvent>,
    _handle: JoinHandle<()>,
}

impl ListingRuntime {
    pub fn start(config: RuntimeConfig) -> Result<Self> {
        config.listing.validate()?;

        let (command_tx, command_rx) = channel();
        let (event_tx, event_rx) = channel();
        let handle = std::thread::Builder::new()
            .name("tonedex-listing".to_string())
            .spawn(move || run_loop(config, command_rx, event_tx))?;

        Ok(Self {
            commands: command_tx,
            rx: event_rx,
            _handle: handle,
        })
    }

    pub fn navigate(&self, intent: NavigationIntent) -> Result<()> {
        self.commands
            .send(ListingCommand::Navigate(intent))
            .map_err(|_| {
                Error::InvalidOperation("listing runtime is no longer running".to_string())
            })
    }

    pub fn shutdown(&self) {
        let _ = self.commands.send(ListingCommand::Shutdown);
    }

    pub fn receiver(&self) -> &Receiver<ListingEvent> {
        &self.rx
    }
}

fn run_loop(
    config: RuntimeConfig,
    commands: Receiver<ListingCommand>,
    events: Sender<ListingEvent>,
) {
    let counts = match config.counts.aggregate_counts() {
        Ok(counts) => counts,
        Err(e) => {
            let _ = events.send(ListingEvent::FatalError(e.to_string()));
            return;
        }
    };

    let mut reconciler = Reconciler::from_query(&config.initial_query);
    let request = reconciler.refresh();
    publish_commit(&events, &reconciler, &config.listing, &counts, &request);
    if !settle(&config, &mut reconciler, &commands, &events, &counts) {
        return;
    }

    loop {
        match commands.recv() {
            Ok(ListingCommand::Navigate(intent)) => {
                let request = reconciler.navigate(intent);
                publish_commit(&events, &reconciler, &config.listing, &counts, &request);
                if !settle(&config, &mut reconciler, &commands, &events, &counts) {
                    return;
                }
            }
            Ok(ListingCommand::Shutdown) | Err(_) => return,
        }
    }
}

fn publish_commit(
    events: &Sender<ListingEvent>,
    reconciler: &Reconciler,
    listing: &ListingConfig,
    counts: &[CategoryCount],
    request: &NavigationRequest,
) {
    let _ = events.send(ListingEvent::NavigationCommitted {
        seq: request.seq,
        query: request.query.clone(),
    });
    let view = ListingView::assemble(reconciler, listing, counts);
    let _ = events.send(ListingEvent::ViewUpdated {
        view: Box::new(view),
    });
}

/// Fetch until the latest committed navigation has been adopted.
///
/// Returns false when the loop should exit (shutdown or data layer failure).
fn settle(
    config: &RuntimeConfig,
    reconciler: &mut Reconciler,
    commands: &Receiver<ListingCommand>,
    events: &Sender<ListingEvent>,
    counts: &[CategoryCount],
) -> bool {
    while reconciler.is_loading() {
        if !drain(commands, reconciler, events, &config.listing, counts) {
            return false;
        }

        let seq = reconciler.seq();
        let state = reconciler.committed().clone();
        let result = match config.source.fetch_page(&state, config.listing.page_size) {
            Ok(result) => result,
            Err(e) => {
                let _ = events.send(ListingEvent::FatalError(e.to_string()));
                return false;
            }
        };

        // A navigation may have been committed while the fetch ran; adopt
        // only if this fetch still matches the latest commit.
        if !drain(commands, reconciler, events, &config.listing, counts) {
            return false;
        }
        match reconciler.observe(seq, result) {
            Observation::Adopted => {
                let view = ListingView::assemble(reconciler, &config.listing, counts);
                let _ = events.send(ListingEvent::ViewUpdated {
                    view: Box::new(view),
                });
            }
            Observation::Stale => {
                let _ = events.send(ListingEvent::StaleResultDiscarded { seq });
            }
        }
    }
    true
}

/// Commit every queued navigation; the last one wins. Returns false on
/// shutdown or when the command channel is gone.
fn drain(
    commands: &Receiver<ListingCommand>,
    reconciler: &mut Reconciler,
    events: &Sender<ListingEvent>,
    listing: &ListingConfig,
    counts: &[CategoryCount],
) -> bool {
    loop {
        match commands.try_recv() {
            Ok(ListingCommand::Navigate(intent)) => {
                let request = reconciler.navigate(intent);
                publish_commit(events, reconciler, listing, counts, &request);
            }
            Ok(ListingCommand::Shutdown) => return false,
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use chrono::Utc;
    use tonedex_types::{Category, CategorySet, PageResult, ToneModel, ViewState};
    use uuid::Uuid;

    struct EchoSource;

    impl PageSource for EchoSource {
        fn fetch_page(&self, state: &ViewState, _page_size: u32) -> anyhow::Result<PageResult> {
            Ok(PageResult {
                models: vec![ToneModel {
                    id: Uuid::new_v4(),
                    title: format!("row for page {}", state.page),
                    description: None,
                    tags: vec![],
                    category_id: 1,
                    username: "ada".to_string(),
                    download_count: 0,
                    created_at: Utc::now(),
                }],
                total: 45,
                page: state.page - 1,
                sort_by: state.sort_by,
                sort_direction: "desc".to_string(),
                categories: CategorySet::new(vec![Category {
                    id: 1,
                    title: "Amp".to_string(),
                    slug: "amp".to_string(),
                }])
                .unwrap(),
                filter: state.filter.clone(),
            })
        }
    }

    struct NoCounts;

    impl CountsSource for NoCounts {
        fn aggregate_counts(&self) -> anyhow::Result<Vec<CategoryCount>> {
            Ok(vec![])
        }
    }

    struct FailingSource;

    impl PageSource for FailingSource {
        fn fetch_page(&self, _state: &ViewState, _page_size: u32) -> anyhow::Result<PageResult> {
            Err(anyhow!("database unavailable"))
        }
    }

    fn wait_for_settled(runtime: &ListingRuntime) -> Box<ListingView> {
        for event in runtime.receiver().iter() {
            if let ListingEvent::ViewUpdated { view } = event
                && !view.loading
            {
                return view;
            }
        }
        panic!("runtime exited before a settled view arrived");
    }

    #[test]
    fn initial_query_settles_into_a_view() {
        let runtime = ListingRuntime::start(RuntimeConfig {
            source: Arc::new(EchoSource),
            counts: Arc::new(NoCounts),
            listing: ListingConfig::default(),
            initial_query: "?page=2&filter=amp".to_string(),
        })
        .unwrap();

        let view = wait_for_settled(&runtime);
        assert_eq!(view.models[0].title, "row for page 2");
        assert_eq!(view.page_count, 3);
        assert_eq!(view.selected_filter.slug, "amp");
        runtime.shutdown();
    }

    #[test]
    fn navigation_command_produces_a_new_settled_view() {
        let runtime = ListingRuntime::start(RuntimeConfig {
            source: Arc::new(EchoSource),
            counts: Arc::new(NoCounts),
            listing: ListingConfig::default(),
            initial_query: String::new(),
        })
        .unwrap();

        let view = wait_for_settled(&runtime);
        assert_eq!(view.models[0].title, "row for page 1");

        runtime.navigate(NavigationIntent::Page(2)).unwrap();
        let view = wait_for_settled(&runtime);
        assert_eq!(view.models[0].title, "row for page 3");
        runtime.shutdown();
    }

    #[test]
    fn fetch_failure_surfaces_as_fatal_error() {
        let runtime = ListingRuntime::start(RuntimeConfig {
            source: Arc::new(FailingSource),
            counts: Arc::new(NoCounts),
            listing: ListingConfig::default(),
            initial_query: String::new(),
        })
        .unwrap();

        let mut saw_fatal = false;
        for event in runtime.receiver().iter() {
            if let ListingEvent::FatalError(msg) = event {
                assert!(msg.contains("database unavailable"));
                saw_fatal = true;
                break;
            }
        }
        assert!(saw_fatal);
    }

    #[test]
    fn invalid_config_is_rejected_at_start() {
        let result = ListingRuntime::start(RuntimeConfig {
            source: Arc::new(EchoSource),
            counts: Arc::new(NoCounts),
            listing: ListingConfig {
                page_size: 0,
                ..ListingConfig::default()
            },
            initial_query: String::new(),
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
