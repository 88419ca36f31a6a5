//! # Tracker bridge application
//!
//! Links platform places to tracker repositories: registers webhooks per place through a
//! strategy set, keeps a recent-issues tile up to date, relays opened issues as discussions
//! (and their tracker comments as replies), and mirrors platform comments back to their
//! issue. Config comes from env plus a JSON places file.

pub mod cli;
pub mod comments;
pub mod config;
pub mod github;
pub mod platform;
pub mod relay;
pub mod runner;
pub mod strategies;
pub mod tiles;

pub use cli::{load_config, read_event, Cli, Commands};
pub use comments::{format_tracker_comment, CommentMirror, MirrorOutcome, COMMENT_MARKER};
pub use config::{load_places, BridgeConfig, LinkedPlace};
pub use github::{GitHubClient, Issue, IssueTracker, RepoRef};
pub use platform::{
    self_ref, CommentEvent, Platform, PlatformDirectory, PlatformUser, RestPlatform,
    FROM_TRACKER_PROP, ISSUE_NUMBER_PROP,
};
pub use relay::{
    comment_message, issue_discussion, IssueCommentEvent, IssueCommentRelay, IssueRelay,
    IssuesEvent, TrackerComment,
};
pub use runner::{
    build_tile_refresher, mirror_comment_event, relay_issue_comment_event, relay_issue_event,
    run_bridge, BridgeComponents,
};
pub use strategies::{webhook_strategy_set, IssueCommentStrategy, IssueStrategy, PlaceSetup};
pub use tiles::{issues_tile, TileRefresher, RECENT_ISSUES_TILE};
