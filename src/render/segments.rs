// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

use super::{DrawCommand, Pen};
use crate::config::{JumpMode, LinkLayoutOptions};
use crate::geometry::{line_segments_intersect, Vector2D};

/// One axis-aligned piece of a routed link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Segment {
    pub from: Vector2D,
    pub to: Vector2D,
    pub pen: Pen,
}

impl Segment {
    pub fn new(from: Vector2D, to: Vector2D, pen: Pen) -> Self {
        Self { from, to, pen }
    }

    fn line(&self, from: Vector2D, to: Vector2D) -> DrawCommand {
        DrawCommand::Line { from, to, pen: self.pen }
    }

    fn terminates_at(&self, point: Vector2D) -> bool {
        self.from == point || self.to == point
    }
}

/// Emits vertical segments (sorted by x) first, then horizontal segments (sorted by y), cutting
/// horizontals where they cross a vertical according to the jump mode.
///
/// Both sorts are stable, so segments on the same coordinate keep their emission order and repeated
/// passes over the same input produce the same command list.
pub(crate) fn draw_segments(
    mut verticals: Vec<Segment>,
    mut horizontals: Vec<Segment>,
    options: &LinkLayoutOptions,
) -> Vec<DrawCommand> {
    verticals.sort_by(|a, b| a.from.x.total_cmp(&b.from.x));
    horizontals.sort_by(|a, b| a.from.y.total_cmp(&b.from.y));

    let mut commands = Vec::with_capacity(verticals.len() + horizontals.len());
    for vertical in &verticals {
        commands.push(vertical.line(vertical.from, vertical.to));
    }

    for horizontal in &horizontals {
        if options.jump_mode == JumpMode::None {
            commands.push(horizontal.line(horizontal.from, horizontal.to));
            continue;
        }
        let crossings = crossings(horizontal, &verticals);
        split_at_crossings(horizontal, &crossings, options, &mut commands);
    }

    commands
}

/// Points where `horizontal` passes through a vertical it is not attached to, ordered from
/// `horizontal.from` towards `horizontal.to`.
fn crossings(horizontal: &Segment, verticals: &[Segment]) -> SmallVec<[Vector2D; 4]> {
    let mut points = verticals
        .iter()
        .filter(|vertical| {
            !vertical.terminates_at(horizontal.from) && !vertical.terminates_at(horizontal.to)
        })
        .filter_map(|vertical| {
            line_segments_intersect(horizontal.from, horizontal.to, vertical.from, vertical.to, false)
                .point()
        })
        .filter(|point| !horizontal.terminates_at(*point))
        .collect::<SmallVec<[Vector2D; 4]>>();

    let origin = horizontal.from.x;
    points.sort_by(|a, b| (a.x - origin).abs().total_cmp(&(b.x - origin).abs()));
    points.dedup();
    points
}

fn split_at_crossings(
    horizontal: &Segment,
    crossings: &[Vector2D],
    options: &LinkLayoutOptions,
    commands: &mut Vec<DrawCommand>,
) {
    let half = options.jump_gap / 2.0;
    let direction = if horizontal.to.x >= horizontal.from.x { 1.0 } else { -1.0 };

    let mut cursor = horizontal.from;
    for crossing in crossings {
        let gap_start = crossing.with_x(crossing.x - direction * half);
        let gap_end = crossing.with_x(crossing.x + direction * half);
        // Crossings closer than one gap share the previous gap.
        if (gap_start.x - cursor.x) * direction < 0.0 {
            continue;
        }
        if (horizontal.to.x - gap_end.x) * direction < 0.0 {
            break;
        }

        commands.push(horizontal.line(cursor, gap_start));
        if options.jump_mode == JumpMode::JumpOver {
            commands.push(DrawCommand::Arc {
                from: gap_start,
                to: gap_end,
                radius: half,
                pen: horizontal.pen,
            });
        }
        cursor = gap_end;
    }
    commands.push(horizontal.line(cursor, horizontal.to));
}

#[cfg(test)]
mod tests {
    use super::{draw_segments, Segment};
    use crate::config::{JumpMode, LinkLayoutOptions};
    use crate::geometry::Vector2D;
    use crate::render::{DrawCommand, Pen};

    fn v(x: f64, y: f64) -> Vector2D {
        Vector2D::new(x, y)
    }

    fn seg(from: Vector2D, to: Vector2D) -> Segment {
        Segment::new(from, to, Pen::default())
    }

    fn options(jump_mode: JumpMode) -> LinkLayoutOptions {
        LinkLayoutOptions { jump_mode, ..LinkLayoutOptions::default() }
    }

    fn line(from: Vector2D, to: Vector2D) -> DrawCommand {
        DrawCommand::Line { from, to, pen: Pen::default() }
    }

    #[test]
    fn verticals_come_first_sorted_by_x_then_horizontals_by_y() {
        let verticals = vec![seg(v(30.0, 0.0), v(30.0, 5.0)), seg(v(10.0, 0.0), v(10.0, 5.0))];
        let horizontals = vec![seg(v(0.0, 50.0), v(5.0, 50.0)), seg(v(0.0, 20.0), v(5.0, 20.0))];
        let commands = draw_segments(verticals, horizontals, &options(JumpMode::None));
        assert_eq!(
            commands,
            vec![
                line(v(10.0, 0.0), v(10.0, 5.0)),
                line(v(30.0, 0.0), v(30.0, 5.0)),
                line(v(0.0, 20.0), v(5.0, 20.0)),
                line(v(0.0, 50.0), v(5.0, 50.0)),
            ]
        );
    }

    #[test]
    fn plain_gap_cuts_four_pixels_around_each_crossing() {
        let verticals = vec![seg(v(10.0, 0.0), v(10.0, 40.0)), seg(v(20.0, 0.0), v(20.0, 40.0))];
        let horizontals = vec![seg(v(0.0, 15.0), v(30.0, 15.0))];
        let commands = draw_segments(verticals, horizontals, &options(JumpMode::PlainGap));
        assert_eq!(
            &commands[2..],
            &[
                line(v(0.0, 15.0), v(8.0, 15.0)),
                line(v(12.0, 15.0), v(18.0, 15.0)),
                line(v(22.0, 15.0), v(30.0, 15.0)),
            ]
        );
    }

    #[test]
    fn jump_over_bridges_the_gap_with_an_arc() {
        let verticals = vec![seg(v(10.0, 0.0), v(10.0, 40.0))];
        let horizontals = vec![seg(v(0.0, 15.0), v(30.0, 15.0))];
        let commands = draw_segments(verticals, horizontals, &options(JumpMode::JumpOver));
        assert_eq!(commands.len(), 4);
        assert_eq!(
            commands[2],
            DrawCommand::Arc {
                from: v(8.0, 15.0),
                to: v(12.0, 15.0),
                radius: 2.0,
                pen: Pen::default()
            }
        );
    }

    #[test]
    fn segments_of_the_same_link_do_not_jump_each_other() {
        // The vertical ends exactly where the horizontal ends, as on the rail of one link.
        let verticals = vec![seg(v(30.0, 15.0), v(30.0, 60.0))];
        let horizontals = vec![seg(v(0.0, 15.0), v(30.0, 15.0))];
        let commands = draw_segments(verticals, horizontals, &options(JumpMode::JumpOver));
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn vertical_through_an_endpoint_is_not_a_crossing() {
        let verticals = vec![seg(v(0.0, 0.0), v(0.0, 40.0))];
        let horizontals = vec![seg(v(0.0, 15.0), v(30.0, 15.0))];
        let commands = draw_segments(verticals, horizontals, &options(JumpMode::PlainGap));
        assert_eq!(commands.len(), 2);
    }
}
