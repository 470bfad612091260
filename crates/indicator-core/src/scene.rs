// File: crates/indicator-core/src/scene.rs
// Summary: Retained scene of drawable nodes with create/update/remove
//          reconciliation per element category.

use std::collections::BTreeMap;

use skia_safe as skia;

use crate::types::TextAnchor;

/// Element categories, ordered back-to-front. The enum order is the z-order:
/// gauge background, steps, threshold, value shape, outline, ticks, then text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    GaugeBg,
    Steps,
    Threshold,
    ValueShape,
    AxisOutline,
    AxisTicks,
    Title,
    Number,
    Delta,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::GaugeBg,
        Category::Steps,
        Category::Threshold,
        Category::ValueShape,
        Category::AxisOutline,
        Category::AxisTicks,
        Category::Title,
        Category::Number,
        Category::Delta,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: skia::Color,
    pub width: f64,
}

/// Drawable node payload. Angles follow the polar convention in `axis`
/// (radians, y-up, theta=PI at the left end of the arc).
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Text {
        text: String,
        x: f64,
        y: f64,
        size: f64,
        anchor: TextAnchor,
        color: skia::Color,
        /// Uniform scale about (x, y); 0 hides the node.
        scale: f64,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Option<skia::Color>,
        stroke: Option<Stroke>,
    },
    /// Annular sector between `theta0` and `theta1` (theta0 >= theta1).
    Sector {
        cx: f64,
        cy: f64,
        inner: f64,
        outer: f64,
        theta0: f64,
        theta1: f64,
        fill: Option<skia::Color>,
        stroke: Option<Stroke>,
    },
    Line {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        stroke: Stroke,
    },
}

/// Retained node set keyed by (category, id). Iteration order is the z-order.
#[derive(Default)]
pub struct Scene {
    nodes: BTreeMap<(Category, String), Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile one category against its desired node list: nodes missing
    /// from the scene are created, present ones updated in place, stale ones
    /// removed. Idempotent; an empty `desired` clears the category, which is
    /// how feature flags toggle visibility.
    pub fn sync(&mut self, category: Category, desired: Vec<(String, Shape)>) {
        let keep: Vec<&String> = desired.iter().map(|(k, _)| k).collect();
        let stale: Vec<(Category, String)> = self
            .nodes
            .range((category, String::new())..)
            .take_while(|((c, _), _)| *c == category)
            .filter(|((_, k), _)| !keep.contains(&k))
            .map(|(key, _)| key.clone())
            .collect();
        for key in stale {
            self.nodes.remove(&key);
        }
        for (key, shape) in desired {
            self.nodes.insert((category, key), shape);
        }
    }

    /// Update a single node in place; used by the animation clock for
    /// targeted per-frame updates. No-op creation is intentional: an advance
    /// racing a removal must not resurrect the node.
    pub fn update(&mut self, category: Category, key: &str, shape: Shape) {
        if let Some(slot) = self.nodes.get_mut(&(category, key.to_string())) {
            *slot = shape;
        }
    }

    pub fn get(&self, category: Category, key: &str) -> Option<&Shape> {
        self.nodes.get(&(category, key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.nodes.keys().filter(|(c, _)| *c == category).count()
    }

    /// Nodes in draw order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = (&(Category, String), &Shape)> {
        self.nodes.iter()
    }
}

/// Desired nodes for every category of one render pass. Composers fill this,
/// the renderer merges fragments from all traces and syncs the scene once.
#[derive(Default)]
pub struct SceneFragment {
    buckets: BTreeMap<Category, Vec<(String, Shape)>>,
}

impl SceneFragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: Category, key: String, shape: Shape) {
        self.buckets.entry(category).or_default().push((key, shape));
    }

    pub fn merge(&mut self, other: SceneFragment) {
        for (cat, mut nodes) in other.buckets {
            self.buckets.entry(cat).or_default().append(&mut nodes);
        }
    }

    /// Apply to the scene, syncing every category (absent buckets clear).
    pub fn apply(mut self, scene: &mut Scene) {
        for cat in Category::ALL {
            let desired = self.buckets.remove(&cat).unwrap_or_default();
            scene.sync(cat, desired);
        }
    }
}
