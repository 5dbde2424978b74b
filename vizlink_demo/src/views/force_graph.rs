// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Force-directed node-link diagram.

use kurbo::{Circle, Point, Shape};
use peniko::Color;
use peniko::color::palette::css;
use vizlink_charts::{RuleMarkSpec, ScaleOrdinal, z_order};
use vizlink_core::{Mark, MarkDiff, MarkId, Scene, TableId};

use crate::config::ViewConfig;
use crate::data::{Graph, Link};
use crate::svg::SvgScene;

const LINKS: TableId = TableId(4);
const NODES: TableId = TableId(5);
const NODE_RADIUS: f64 = 5.0;

const CATEGORY10: [[u8; 3]; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

/// Position and velocity of one simulated node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimNode {
    /// Position.
    pub x: f64,
    /// Position.
    pub y: f64,
    /// Velocity.
    pub vx: f64,
    /// Velocity.
    pub vy: f64,
}

/// A deterministic velocity-Verlet simulation with link, many-body and centering forces.
#[derive(Clone, Debug)]
pub struct ForceSimulation {
    nodes: Vec<SimNode>,
    links: Vec<Link>,
    strengths: Vec<f64>,
    biases: Vec<f64>,
    center: Point,
    alpha: f64,
    alpha_min: f64,
    alpha_decay: f64,
    velocity_decay: f64,
    link_distance: f64,
    charge: f64,
}

impl ForceSimulation {
    /// Places `node_count` nodes on a phyllotaxis spiral and prepares the link forces.
    pub fn new(node_count: usize, links: Vec<Link>, center: Point) -> Self {
        let initial_angle = core::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
        let nodes = (0..node_count)
            .map(|i| {
                let i = i as f64;
                let radius = 10.0 * (0.5 + i).sqrt();
                let angle = i * initial_angle;
                SimNode {
                    x: radius * angle.cos(),
                    y: radius * angle.sin(),
                    ..SimNode::default()
                }
            })
            .collect();

        let mut degree = vec![0_usize; node_count];
        for l in &links {
            degree[l.source] += 1;
            degree[l.target] += 1;
        }
        let strengths = links
            .iter()
            .map(|l| 1.0 / degree[l.source].min(degree[l.target]).max(1) as f64)
            .collect();
        let biases = links
            .iter()
            .map(|l| {
                let (s, t) = (degree[l.source] as f64, degree[l.target] as f64);
                s / (s + t)
            })
            .collect();

        Self {
            nodes,
            links,
            strengths,
            biases,
            center,
            alpha: 1.0,
            alpha_min: 0.001,
            alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
            velocity_decay: 0.6,
            link_distance: 30.0,
            charge: -30.0,
        }
    }

    /// Returns the current cooling parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the nodes.
    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self) {
        self.alpha += -self.alpha * self.alpha_decay;
        self.apply_links();
        self.apply_charge();
        self.apply_center();
        for n in &mut self.nodes {
            n.vx *= self.velocity_decay;
            n.vy *= self.velocity_decay;
            n.x += n.vx;
            n.y += n.vy;
        }
    }

    /// Ticks until alpha falls below its minimum; returns the number of ticks.
    pub fn run(&mut self) -> usize {
        let mut ticks = 0;
        while self.alpha >= self.alpha_min {
            self.tick();
            ticks += 1;
        }
        tracing::debug!(ticks, nodes = self.nodes.len(), "force layout settled");
        ticks
    }

    fn apply_links(&mut self) {
        for (i, l) in self.links.iter().enumerate() {
            let (s, t) = (self.nodes[l.source], self.nodes[l.target]);
            let mut x = t.x + t.vx - s.x - s.vx;
            let mut y = t.y + t.vy - s.y - s.vy;
            if x == 0.0 {
                x = jiggle(i);
            }
            if y == 0.0 {
                y = jiggle(i + 1);
            }
            let len = x.hypot(y);
            let k = (len - self.link_distance) / len * self.alpha * self.strengths[i];
            let (x, y) = (x * k, y * k);
            let b = self.biases[i];
            let target = &mut self.nodes[l.target];
            target.vx -= x * b;
            target.vy -= y * b;
            let source = &mut self.nodes[l.source];
            source.vx += x * (1.0 - b);
            source.vy += y * (1.0 - b);
        }
    }

    fn apply_charge(&mut self) {
        let n = self.nodes.len();
        for i in 0..n {
            let (mut fx, mut fy) = (0.0, 0.0);
            let a = self.nodes[i];
            for j in 0..n {
                if i == j {
                    continue;
                }
                let b = self.nodes[j];
                let mut x = b.x - a.x;
                let mut y = b.y - a.y;
                if x == 0.0 {
                    x = jiggle(i + j);
                }
                if y == 0.0 {
                    y = jiggle(i + j + 1);
                }
                let mut l = x * x + y * y;
                if l < 1.0 {
                    l = l.sqrt();
                }
                fx += x * self.charge * self.alpha / l;
                fy += y * self.charge * self.alpha / l;
            }
            self.nodes[i].vx += fx;
            self.nodes[i].vy += fy;
        }
    }

    fn apply_center(&mut self) {
        let n = self.nodes.len();
        if n == 0 {
            return;
        }
        let (sx, sy) = self
            .nodes
            .iter()
            .fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
        let dx = sx / n as f64 - self.center.x;
        let dy = sy / n as f64 - self.center.y;
        for p in &mut self.nodes {
            p.x -= dx;
            p.y -= dy;
        }
    }
}

/// A tiny deterministic offset separating coincident nodes.
fn jiggle(seed: usize) -> f64 {
    let sign = if seed % 2 == 0 { 1.0 } else { -1.0 };
    sign * 1e-6 * (1 + seed % 7) as f64
}

/// The force-directed graph view.
#[derive(Debug)]
pub struct ForceGraph {
    config: ViewConfig,
    graph: Graph,
    colors: ScaleOrdinal<Color>,
    simulation: ForceSimulation,
    scene: Scene,
}

impl ForceGraph {
    /// Creates the view with a simulation centered in the container.
    pub fn new(config: ViewConfig, graph: Graph) -> Self {
        let mut groups: Vec<String> = Vec::new();
        for node in &graph.nodes {
            let g = node.group.to_string();
            if !groups.contains(&g) {
                groups.push(g);
            }
        }
        let palette = CATEGORY10
            .iter()
            .map(|[r, g, b]| Color::from_rgb8(*r, *g, *b))
            .collect();
        let colors = ScaleOrdinal::new(groups, palette, css::GRAY);
        let center = Point::new(config.width * 0.5, config.height * 0.5);
        let simulation = ForceSimulation::new(graph.nodes.len(), graph.links.clone(), center);
        Self {
            config,
            graph,
            colors,
            simulation,
            scene: Scene::new(),
        }
    }

    /// Runs the simulation to rest and draws the result.
    pub fn update_vis(&mut self) -> Vec<MarkDiff> {
        self.simulation.run();
        self.render_vis()
    }

    /// Draws links and nodes at their current positions.
    pub fn render_vis(&mut self) -> Vec<MarkDiff> {
        let nodes = self.simulation.nodes();
        let link_keys: Vec<u64> = (0..self.graph.links.len() as u64).collect();
        let node_keys: Vec<u64> = (0..self.graph.nodes.len() as u64).collect();
        self.scene.bind(LINKS, &link_keys, |k| *k);
        self.scene.bind(NODES, &node_keys, |k| *k);

        let mut marks = Vec::with_capacity(link_keys.len() + node_keys.len());
        let link_color = Color::from_rgb8(0x99, 0x99, 0x99).with_alpha(0.6);
        for (i, l) in self.graph.links.iter().enumerate() {
            let (s, t) = (nodes[l.source], nodes[l.target]);
            marks.push(
                RuleMarkSpec::new(MarkId::for_row(LINKS, i as u64), s.x, s.y, t.x, t.y)
                    .with_stroke(link_color, l.value.sqrt())
                    .with_z_index(z_order::SERIES_STROKE)
                    .mark(),
            );
        }
        for (i, node) in self.graph.nodes.iter().enumerate() {
            let p = nodes[i];
            let fill = *self.colors.map(&node.group.to_string());
            marks.push(
                Mark::builder(MarkId::for_row(NODES, i as u64))
                    .path()
                    .z_index(z_order::SERIES_POINTS)
                    .geometry(Circle::new((p.x, p.y), NODE_RADIUS).to_path(0.1))
                    .fill(fill)
                    .stroke(css::WHITE)
                    .stroke_width(1.5)
                    .tooltip(node.id.clone())
                    .build(),
            );
        }
        self.scene.tick(marks)
    }

    /// Returns the simulation.
    pub fn simulation(&self) -> &ForceSimulation {
        &self.simulation
    }

    /// Returns the render surface.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Serializes the current state.
    pub fn to_svg(&self) -> String {
        let config = &self.config;
        let mut svg = SvgScene::new(&config.parent_element, config.width, config.height);
        svg.push_scene(&self.scene);
        svg.to_svg_string()
    }
}
