//! Nelder-Mead simplex minimizer for smoothing-parameter estimation.
//!
//! Derivative-free and deterministic, which keeps forecast runs repeatable.
//! Standard reflection/expansion/contraction coefficients; every candidate
//! point is clamped to the parameter bounds.

/// Stopping criteria for [`minimize`].
#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
        }
    }
}

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;
const INITIAL_STEP: f64 = 0.05;

/// Minimize `objective` starting from `initial`, keeping every coordinate
/// inside its `bounds` interval. Returns the best point found.
pub fn minimize<F>(objective: F, initial: &[f64], bounds: &[(f64, f64)], options: FitOptions) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    debug_assert_eq!(n, bounds.len());
    if n == 0 {
        return Vec::new();
    }

    let clamp = |point: &mut Vec<f64>| {
        for (x, (lo, hi)) in point.iter_mut().zip(bounds) {
            *x = x.clamp(*lo, *hi);
        }
    };

    // Simplex: initial point plus one perturbed vertex per dimension.
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(initial.to_vec());
    for i in 0..n {
        let mut vertex = initial.to_vec();
        let step = if vertex[i].abs() > 1e-10 {
            INITIAL_STEP * vertex[i].abs()
        } else {
            INITIAL_STEP
        };
        vertex[i] += step;
        clamp(&mut vertex);
        simplex.push(vertex);
    }
    let mut scores: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

    for _ in 0..options.max_iter {
        // Order vertices best to worst.
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
        let best = order[0];
        let worst = order[n];
        let second_worst = order[n - 1];

        if (scores[worst] - scores[best]).abs() < options.tolerance {
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; n];
        for (idx, vertex) in simplex.iter().enumerate() {
            if idx == worst {
                continue;
            }
            for (c, x) in centroid.iter_mut().zip(vertex) {
                *c += x / n as f64;
            }
        }

        let blend = |coef: f64| {
            let mut point: Vec<f64> = centroid
                .iter()
                .zip(&simplex[worst])
                .map(|(c, w)| c + coef * (c - w))
                .collect();
            clamp(&mut point);
            point
        };

        let reflected = blend(REFLECT);
        let reflected_score = objective(&reflected);

        if reflected_score < scores[best] {
            // Try expanding further in the same direction.
            let expanded = blend(EXPAND);
            let expanded_score = objective(&expanded);
            if expanded_score < reflected_score {
                simplex[worst] = expanded;
                scores[worst] = expanded_score;
            } else {
                simplex[worst] = reflected;
                scores[worst] = reflected_score;
            }
        } else if reflected_score < scores[second_worst] {
            simplex[worst] = reflected;
            scores[worst] = reflected_score;
        } else {
            let contracted = blend(-CONTRACT);
            let contracted_score = objective(&contracted);
            if contracted_score < scores[worst] {
                simplex[worst] = contracted;
                scores[worst] = contracted_score;
            } else {
                // Shrink everything toward the best vertex.
                let best_vertex = simplex[best].clone();
                for (idx, vertex) in simplex.iter_mut().enumerate() {
                    if idx == best {
                        continue;
                    }
                    for (x, b) in vertex.iter_mut().zip(&best_vertex) {
                        *x = b + SHRINK * (*x - b);
                    }
                    clamp(vertex);
                    scores[idx] = objective(vertex);
                }
            }
        }
    }

    let best = (0..=n)
        .min_by(|&a, &b| scores[a].total_cmp(&scores[b]))
        .unwrap_or(0);
    simplex.swap_remove(best)
}
