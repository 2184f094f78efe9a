mod mock_upstream;

pub use mock_upstream::MockUpstreamFetcher;
