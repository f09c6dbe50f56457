//! The individual forces of one simulation step.
//!
//! Each force reads positions and nudges velocities, except centering, which
//! shifts positions directly. They run over a contiguous copy of the node
//! states so pairwise forces can index freely.

use rand::Rng;

/// Kinematic state of one node during a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Body {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    /// Signed many-body strength; negative repels.
    pub strength: f64,
    /// Position the node is held at while pinned or dragged.
    pub fixed: Option<(f64, f64)>,
}

/// A spring between two bodies, by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Link {
    pub source: usize,
    pub target: usize,
    pub distance: f64,
    pub strength: f64,
    /// Share of the correction applied to the target.
    pub bias: f64,
}

impl Link {
    /// Builds the springs for `edges`, given each body's radius.
    ///
    /// Strength is `1 / min(degree)` and the correction is split in
    /// proportion to the endpoints' degrees, so hubs move less.
    pub(crate) fn build(
        edges: &[(usize, usize)],
        radii: &[f64],
        base_distance: f64,
        radius_cap: f64,
    ) -> Vec<Link> {
        let mut degree = vec![0usize; radii.len()];
        for &(s, t) in edges {
            degree[s] += 1;
            degree[t] += 1;
        }
        edges
            .iter()
            .map(|&(source, target)| {
                let (ds, dt) = (degree[source] as f64, degree[target] as f64);
                Link {
                    source,
                    target,
                    distance: base_distance + (radii[source] + radii[target]).min(radius_cap),
                    strength: 1.0 / ds.min(dt),
                    bias: ds / (ds + dt),
                }
            })
            .collect()
    }
}

/// A tiny non-zero offset in `(-5e-7, 5e-7)` that separates coincident
/// bodies.
pub(crate) fn jiggle(rng: &mut impl Rng) -> f64 {
    let j = (rng.random::<f64>() - 0.5) * 1e-6;
    if j == 0.0 { 1e-7 } else { j }
}

fn nonzero_or_jiggle(v: f64, rng: &mut impl Rng) -> f64 {
    if v == 0.0 { jiggle(rng) } else { v }
}

/// Exact pairwise repulsion. Squared distances below 1 are softened.
pub(crate) fn many_body(bodies: &mut [Body], alpha: f64, rng: &mut impl Rng) {
    for i in 0..bodies.len() {
        let (xi, yi) = (bodies[i].x, bodies[i].y);
        let (mut dvx, mut dvy) = (0.0, 0.0);
        for (j, other) in bodies.iter().enumerate() {
            if i == j {
                continue;
            }
            let mut x = other.x - xi;
            let mut y = other.y - yi;
            let mut l = x * x + y * y;
            if x == 0.0 {
                x = jiggle(rng);
                l += x * x;
            }
            if y == 0.0 {
                y = jiggle(rng);
                l += y * y;
            }
            if l < 1.0 {
                l = l.sqrt();
            }
            let w = other.strength * alpha / l;
            dvx += x * w;
            dvy += y * w;
        }
        bodies[i].vx += dvx;
        bodies[i].vy += dvy;
    }
}

/// Pulls linked bodies towards their rest length, using the positions they
/// are about to move to.
pub(crate) fn links(bodies: &mut [Body], links: &[Link], alpha: f64, rng: &mut impl Rng) {
    for link in links {
        let (s, t) = (bodies[link.source], bodies[link.target]);
        let x = nonzero_or_jiggle(t.x + t.vx - s.x - s.vx, rng);
        let y = nonzero_or_jiggle(t.y + t.vy - s.y - s.vy, rng);
        let l = (x * x + y * y).sqrt();
        let k = (l - link.distance) / l * alpha * link.strength;
        let (x, y) = (x * k, y * k);

        let target = &mut bodies[link.target];
        target.vx -= x * link.bias;
        target.vy -= y * link.bias;
        let source = &mut bodies[link.source];
        source.vx += x * (1.0 - link.bias);
        source.vy += y * (1.0 - link.bias);
    }
}

/// Translates every body so their mean position lands on `center`.
pub(crate) fn recenter(bodies: &mut [Body], center: (f64, f64)) {
    if bodies.is_empty() {
        return;
    }
    let n = bodies.len() as f64;
    let sx = bodies.iter().map(|b| b.x).sum::<f64>() / n - center.0;
    let sy = bodies.iter().map(|b| b.y).sum::<f64>() / n - center.1;
    for b in bodies {
        b.x -= sx;
        b.y -= sy;
    }
}

/// Independent spring pulls on each axis towards `center`.
pub(crate) fn anchor_pull(
    bodies: &mut [Body],
    center: (f64, f64),
    strength: (f64, f64),
    alpha: f64,
) {
    for b in bodies {
        b.vx += (center.0 - b.x) * strength.0 * alpha;
        b.vy += (center.1 - b.y) * strength.1 * alpha;
    }
}

/// Pushes apart bodies whose padded circles overlap at their next
/// positions. The smaller body takes the larger share of the push.
pub(crate) fn collide(bodies: &mut [Body], padding: f64, rng: &mut impl Rng) {
    for i in 0..bodies.len() {
        let ri = bodies[i].radius + padding;
        let ri2 = ri * ri;
        let xi = bodies[i].x + bodies[i].vx;
        let yi = bodies[i].y + bodies[i].vy;
        for j in (i + 1)..bodies.len() {
            let other = bodies[j];
            let rj = other.radius + padding;
            let r = ri + rj;
            let mut x = xi - other.x - other.vx;
            let mut y = yi - other.y - other.vy;
            let mut l = x * x + y * y;
            if l >= r * r {
                continue;
            }
            if x == 0.0 {
                x = jiggle(rng);
                l += x * x;
            }
            if y == 0.0 {
                y = jiggle(rng);
                l += y * y;
            }
            let d = l.sqrt();
            let k = (r - d) / d;
            let (x, y) = (x * k, y * k);
            let rj2 = rj * rj;
            let share = rj2 / (ri2 + rj2);

            bodies[i].vx += x * share;
            bodies[i].vy += y * share;
            bodies[j].vx -= x * (1.0 - share);
            bodies[j].vy -= y * (1.0 - share);
        }
    }
}

/// Applies velocity decay and moves free bodies; held bodies snap to their
/// fixed position and lose their velocity.
pub(crate) fn integrate(bodies: &mut [Body], velocity_decay: f64) {
    let keep = 1.0 - velocity_decay;
    for b in bodies {
        match b.fixed {
            Some((fx, fy)) => {
                b.x = fx;
                b.y = fy;
                b.vx = 0.0;
                b.vy = 0.0;
            }
            None => {
                b.vx *= keep;
                b.vy *= keep;
                b.x += b.vx;
                b.y += b.vy;
            }
        }
    }
}
