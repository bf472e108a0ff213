use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

/// §4.11 `C12`: resolves a seat-map image for a venue, keyed by the event's
/// `seat_map_url` if present, falling back to the venue name. Results are
/// cached since the same venue is looked up across many events.
pub struct SeatMapResolver {
    cache: Mutex<LruCache<String, Option<Vec<u8>>>>,
    client: reqwest::Client,
}

impl SeatMapResolver {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(NonZeroUsize::new(capacity.max(1)).unwrap())),
            client: reqwest::Client::new(),
        }
    }

    fn cache_key(seat_map_url: Option<&str>, venue_name: &str) -> String {
        seat_map_url.unwrap_or(venue_name).to_string()
    }

    /// Returns the cached image bytes if present, without touching the
    /// network.
    pub fn peek(&self, seat_map_url: Option<&str>, venue_name: &str) -> Option<Option<Vec<u8>>> {
        let key = Self::cache_key(seat_map_url, venue_name);
        self.cache.lock().unwrap().get(&key).cloned()
    }

    /// Fetches and caches the seat-map image. Returns `None` (cached) when
    /// there is no URL to fetch from and no prior cached image for the
    /// venue.
    pub async fn resolve(&self, seat_map_url: Option<&str>, venue_name: &str) -> Option<Vec<u8>> {
        let key = Self::cache_key(seat_map_url, venue_name);
        if let Some(cached) = self.cache.lock().unwrap().get(&key) {
            return cached.clone();
        }

        let image = match seat_map_url {
            Some(url) => self.client.get(url).send().await.ok()?.bytes().await.ok().map(|b| b.to_vec()),
            None => None,
        };

        self.cache.lock().unwrap().put(key, image.clone());
        image
    }
}
