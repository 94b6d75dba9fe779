use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::config::MAX_SESSIONS;
use crate::content::{self, ContentEngagementRecord, PromotionRecord};
use crate::heatmap::{self, HeatmapRow};
use crate::summary::{self, DashboardMetrics};
use crate::traffic::{self, DailyBucket, HourlyBucket, VisitSample};

/// Everything generated for one session. Immutable once built.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub generated_at: NaiveDateTime,
    pub traffic: Vec<VisitSample>,
    pub content_engagement: Vec<ContentEngagementRecord>,
    pub promotions: Vec<PromotionRecord>,
    pub heatmap: Vec<HeatmapRow>,
}

impl Snapshot {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, now: NaiveDateTime) -> Self {
        let today = now.date();
        Snapshot {
            generated_at: now,
            traffic: traffic::generate_traffic(rng, today),
            content_engagement: content::generate_content_engagement(rng, today),
            promotions: content::top_promotions(),
            heatmap: heatmap::generate_heatmap(rng),
        }
    }

    pub fn metrics(&self) -> DashboardMetrics {
        summary::calculate_metrics(
            &self.traffic,
            &self.content_engagement,
            &self.promotions,
            self.generated_at,
        )
    }

    pub fn hourly(&self) -> Vec<HourlyBucket> {
        traffic::hourly_traffic(&self.traffic, self.generated_at)
    }

    pub fn daily(&self) -> Vec<DailyBucket> {
        traffic::daily_traffic(&self.traffic, self.generated_at)
    }
}

/// Data is only generated once the page is live in the browser; until then a
/// session is `Pending` and the page shows a loading state.
#[derive(Debug, Clone)]
pub enum SessionData {
    Pending,
    Ready(Arc<Snapshot>),
}

#[derive(Debug, Clone)]
pub struct Session {
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub data: SessionData,
}

/// Source of randomness for new snapshots.
#[derive(Debug, Clone, Copy)]
pub enum RngSource {
    Entropy,
    Seeded(u64),
}

impl RngSource {
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or(RngSource::Entropy, RngSource::Seeded)
    }

    pub fn rng(self) -> StdRng {
        match self {
            RngSource::Entropy => StdRng::from_entropy(),
            RngSource::Seeded(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

pub struct SessionRegistry {
    sessions: HashMap<Uuid, Session>,
    rng_source: RngSource,
    capacity: usize,
}

impl SessionRegistry {
    pub fn new(rng_source: RngSource) -> Self {
        Self::with_capacity(rng_source, MAX_SESSIONS)
    }

    /// A registry holding at most `capacity` sessions (minimum one).
    pub fn with_capacity(rng_source: RngSource, capacity: usize) -> Self {
        SessionRegistry {
            sessions: HashMap::new(),
            rng_source,
            capacity: capacity.max(1),
        }
    }

    /// Opens a pending session, evicting the least recently seen ones when full.
    pub fn create(&mut self) -> Uuid {
        while self.sessions.len() >= self.capacity {
            if !self.evict_least_recent() {
                break;
            }
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            Session {
                created_at: now,
                last_seen: now,
                data: SessionData::Pending,
            },
        );
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<&Session> {
        self.sessions.get(id)
    }

    #[cfg(test)]
    pub fn is_ready(&self, id: &Uuid) -> bool {
        self.sessions
            .get(id)
            .is_some_and(|s| matches!(s.data, SessionData::Ready(_)))
    }

    /// Returns the session's snapshot, generating it on first use.
    ///
    /// `None` if the session is unknown.
    pub fn ensure_ready(&mut self, id: &Uuid, now: NaiveDateTime) -> Option<Arc<Snapshot>> {
        let rng_source = self.rng_source;
        let session = self.sessions.get_mut(id)?;
        session.last_seen = Utc::now();

        if let SessionData::Ready(snapshot) = &session.data {
            return Some(Arc::clone(snapshot));
        }

        let snapshot = Arc::new(Snapshot::generate(&mut rng_source.rng(), now));
        debug!(
            session = %id,
            samples = snapshot.traffic.len(),
            "generated dashboard snapshot"
        );
        session.data = SessionData::Ready(Arc::clone(&snapshot));
        Some(snapshot)
    }

    /// Current lifecycle state of a session, without generating anything.
    pub fn data(&mut self, id: &Uuid) -> Option<SessionData> {
        let session = self.sessions.get_mut(id)?;
        session.last_seen = Utc::now();
        Some(session.data.clone())
    }

    pub fn count(&self) -> usize {
        self.sessions.len()
    }

    fn evict_least_recent(&mut self) -> bool {
        let Some(oldest) = self
            .sessions
            .iter()
            .min_by_key(|(_, session)| session.last_seen)
            .map(|(id, _)| *id)
        else {
            return false;
        };
        self.sessions.remove(&oldest);
        debug!(session = %oldest, "evicted least recently seen session");
        true
    }

    /// Drops sessions not seen within `max_idle`. Returns how many were removed.
    pub fn prune_idle(&mut self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.last_seen >= cutoff);
        before - self.sessions.len()
    }
}
