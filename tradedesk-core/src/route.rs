//! Hash-based routing: `#/home`, `#/orders`, `#/buy`.

use serde::{Deserialize, Serialize};

/// A page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Home,
    Orders,
    Buy,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Orders, Route::Buy];

    /// Resolve a location hash. Only an exact `#/orders` or `#/buy` selects
    /// those pages; anything else maps to [`Route::Home`].
    pub fn from_hash(hash: &str) -> Route {
        let hash = hash.trim();
        Self::ALL
            .into_iter()
            .find(|route| route.hash() == hash)
            .unwrap_or_default()
    }

    pub fn hash(self) -> &'static str {
        match self {
            Route::Home => "#/home",
            Route::Orders => "#/orders",
            Route::Buy => "#/buy",
        }
    }

    /// Nav bar tab label.
    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Strona domowa",
            Route::Orders => "Złożone zlecenia",
            Route::Buy => "Kup instrument",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Route::Home => 0,
            Route::Orders => 1,
            Route::Buy => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn next(self) -> Route {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Route {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Current location and the page it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    hash: String,
    route: Route,
}

impl Default for Router {
    fn default() -> Self {
        Self::new("")
    }
}

impl Router {
    pub fn new(initial_hash: &str) -> Self {
        let hash = normalize(initial_hash);
        Self {
            route: Route::from_hash(&hash),
            hash,
        }
    }

    /// Change the location.
    ///
    /// Returns the page to mount when the hash actually changed, `None` when
    /// it is the current hash (the page is left as it is).
    pub fn navigate(&mut self, hash: &str) -> Option<Route> {
        let hash = normalize(hash);
        if hash == self.hash {
            return None;
        }
        self.route = Route::from_hash(&hash);
        self.hash = hash;
        tracing::debug!(hash = %self.hash, route = ?self.route, "navigated");
        Some(self.route)
    }

    /// Navigate to a route's canonical hash (nav bar click).
    pub fn go(&mut self, route: Route) -> Option<Route> {
        self.navigate(route.hash())
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// The highlighted nav tab. Unknown hashes highlight the default tab.
    pub fn active_tab(&self) -> Route {
        self.route
    }
}

fn normalize(hash: &str) -> String {
    let hash = hash.trim();
    if hash.is_empty() || hash == "#" {
        Route::Home.hash().to_string()
    } else if hash.starts_with('#') {
        hash.to_string()
    } else if let Some(path) = hash.strip_prefix('/') {
        format!("#/{path}")
    } else {
        format!("#/{hash}")
    }
}
