mod mocks;

pub use mocks::{channel_feed, ChannelChangeFeed, FeedSender, MockHostsTable};
