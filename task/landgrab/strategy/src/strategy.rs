use crate::invoker::Strategy;

use landgrab_proto::{Move, Point};
use rand::{seq::SliceRandom, Rng};

use std::collections::{HashSet, VecDeque};

////////////////////////////////////////////////////////////////////////////////

/// Upper bound on cells visited by one search, for absurd board sizes.
pub const SEARCH_LIMIT: usize = 1 << 18;

fn is_open(cell: Option<Point>, walls: &[Point], board_size: i32) -> bool {
    cell.is_some_and(|cell| cell.in_bounds(board_size) && !walls.contains(&cell))
}

fn random_open_move(rng: &mut impl Rng, me: Point, walls: &[Point], board_size: i32) -> Move {
    let mut directions = Move::DIRECTIONS;
    directions.shuffle(rng);

    directions
        .into_iter()
        .find(|&direction| is_open(me.adjacent(direction), walls, board_size))
        .unwrap_or(Move::Stay)
}

////////////////////////////////////////////////////////////////////////////////

/// Wanders in a random direction every turn, walls or not.
pub struct RandomWalk<R> {
    rng: R,
}

impl<R: Rng> RandomWalk<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Strategy for RandomWalk<R> {
    fn decide(&mut self, _: Point, _: &[Point], _: &[Point], _: i32) -> anyhow::Result<String> {
        let direction = Move::DIRECTIONS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Move::Stay);
        Ok(direction.to_string())
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Heads straight for the nearest coin, sidestepping when a wall is in the way.
pub struct Greedy<R> {
    rng: R,
}

impl<R: Rng> Greedy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn next_move(&mut self, me: Point, coins: &[Point], walls: &[Point], board_size: i32) -> Move {
        let Some(&target) = coins.iter().min_by_key(|coin| me.distance_to(**coin)) else {
            return *Move::DIRECTIONS.choose(&mut self.rng).unwrap_or(&Move::Stay);
        };

        let horizontal = match target.0.cmp(&me.0) {
            std::cmp::Ordering::Greater => Some(Move::MoveRight),
            std::cmp::Ordering::Less => Some(Move::MoveLeft),
            std::cmp::Ordering::Equal => None,
        };
        let vertical = match target.1.cmp(&me.1) {
            std::cmp::Ordering::Greater => Some(Move::MoveDown),
            std::cmp::Ordering::Less => Some(Move::MoveUp),
            std::cmp::Ordering::Equal => None,
        };

        let preferred = if target.0.abs_diff(me.0) > target.1.abs_diff(me.1) {
            [horizontal, vertical]
        } else {
            [vertical, horizontal]
        };

        preferred
            .into_iter()
            .flatten()
            .find(|&direction| is_open(me.adjacent(direction), walls, board_size))
            .unwrap_or_else(|| random_open_move(&mut self.rng, me, walls, board_size))
    }
}

impl<R: Rng> Strategy for Greedy<R> {
    fn decide(
        &mut self,
        me: Point,
        coins: &[Point],
        walls: &[Point],
        board_size: i32,
    ) -> anyhow::Result<String> {
        Ok(self.next_move(me, coins, walls, board_size).to_string())
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Walks the shortest wall-free path to the closest reachable coin.
pub struct Pathfinder<R> {
    rng: R,
}

impl<R: Rng> Pathfinder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// First step of a shortest path to any coin, breadth-first.
    fn first_step(me: Point, coins: &[Point], walls: &[Point], board_size: i32) -> Option<Move> {
        let coins = coins.iter().copied().collect::<HashSet<_>>();
        let walls = walls.iter().copied().collect::<HashSet<_>>();

        let mut visited = HashSet::from([me]);
        let mut queue = VecDeque::new();

        for (direction, cell) in me.iter_moves() {
            if cell.in_bounds(board_size) && !walls.contains(&cell) && visited.insert(cell) {
                queue.push_back((cell, direction));
            }
        }

        while let Some((cell, first)) = queue.pop_front() {
            if coins.contains(&cell) {
                return Some(first);
            }
            if visited.len() > SEARCH_LIMIT {
                return None;
            }

            for (_, next) in cell.iter_moves() {
                if next.in_bounds(board_size) && !walls.contains(&next) && visited.insert(next) {
                    queue.push_back((next, first));
                }
            }
        }

        None
    }
}

impl<R: Rng> Strategy for Pathfinder<R> {
    fn decide(
        &mut self,
        me: Point,
        coins: &[Point],
        walls: &[Point],
        board_size: i32,
    ) -> anyhow::Result<String> {
        let direction = match Self::first_step(me, coins, walls, board_size) {
            Some(direction) => direction,
            None => random_open_move(&mut self.rng, me, walls, board_size),
        };
        Ok(direction.to_string())
    }
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test {
    use super::*;
    use crate::invoker::invoke;
    use landgrab_proto::GameState;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn decide(strategy: &mut impl Strategy, me: Point, coins: &[Point], walls: &[Point]) -> Move {
        strategy
            .decide(me, coins, walls, 15)
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn random_walk_only_moves() {
        let mut strategy = RandomWalk::new(rng());
        for _ in 0..50 {
            let direction = decide(&mut strategy, Point(0, 0), &[], &[]);
            assert!(Move::DIRECTIONS.contains(&direction));
        }
    }

    #[test]
    fn greedy_closes_the_longer_axis_first() {
        let mut strategy = Greedy::new(rng());

        assert_eq!(decide(&mut strategy, Point(0, 0), &[Point(5, 1)], &[]), Move::MoveRight);
        assert_eq!(decide(&mut strategy, Point(5, 5), &[Point(4, 0)], &[]), Move::MoveUp);
        assert_eq!(decide(&mut strategy, Point(5, 5), &[Point(3, 7)], &[]), Move::MoveDown);
        assert_eq!(
            decide(&mut strategy, Point(5, 5), &[Point(9, 9), Point(5, 2)], &[]),
            Move::MoveUp
        );
    }

    #[test]
    fn greedy_sidesteps_walls() {
        let mut strategy = Greedy::new(rng());

        assert_eq!(
            decide(&mut strategy, Point(0, 0), &[Point(5, 1)], &[Point(1, 0)]),
            Move::MoveDown
        );

        let boxed_in = [Point(1, 0), Point(0, 1)];
        assert_eq!(
            decide(&mut strategy, Point(0, 0), &[Point(5, 5)], &boxed_in),
            Move::Stay
        );
    }

    #[test]
    fn greedy_stays_on_board() {
        let mut strategy = Greedy::new(rng());
        let walls = [Point(13, 14)];

        for _ in 0..20 {
            let direction = decide(&mut strategy, Point(14, 14), &[Point(14, 14)], &walls);
            assert_eq!(direction, Move::MoveUp);
        }
    }

    #[test]
    fn pathfinder_goes_around_walls() {
        // Coin straight right, but a wall column forces a detour through y = 3.
        let walls = [Point(1, 0), Point(1, 1), Point(1, 2)];
        let mut strategy = Pathfinder::new(rng());

        assert_eq!(
            decide(&mut strategy, Point(0, 0), &[Point(2, 0)], &walls),
            Move::MoveDown
        );
        assert_eq!(
            decide(&mut strategy, Point(0, 3), &[Point(2, 0)], &walls),
            Move::MoveRight
        );
    }

    #[test]
    fn pathfinder_prefers_reachable_coins() {
        let walls = [Point(4, 5), Point(6, 5), Point(5, 4), Point(5, 6)];
        let coins = [Point(5, 5), Point(0, 3)];
        let mut strategy = Pathfinder::new(rng());

        assert_eq!(decide(&mut strategy, Point(3, 3), &coins, &walls), Move::MoveLeft);
    }

    #[test]
    fn pathfinder_without_targets() {
        let mut strategy = Pathfinder::new(rng());

        let direction = decide(&mut strategy, Point(0, 0), &[], &[Point(1, 0)]);
        assert_eq!(direction, Move::MoveDown);

        let walls = [Point(1, 0), Point(0, 1)];
        assert_eq!(decide(&mut strategy, Point(0, 0), &[Point(9, 9)], &walls), Move::Stay);

        assert_eq!(
            strategy.decide(Point(0, 0), &[Point(1, 1)], &[], 0).unwrap(),
            "STAY"
        );
    }

    #[test]
    fn extreme_coordinates_do_not_fault() {
        let far_apart = GameState::parse(
            r#"{"my_pos":[-2147483648,0],"coins":[[2147483647,0]],"walls":[]}"#,
        );
        let corner = GameState::parse(
            r#"{"my_pos":[2147483647,2147483647],"coins":[[0,0]],"walls":[]}"#,
        );

        for state in [&far_apart, &corner] {
            assert_eq!(invoke(&mut Greedy::new(rng()), state).unwrap().as_str(), "STAY");
            assert_eq!(invoke(&mut Pathfinder::new(rng()), state).unwrap().as_str(), "STAY");
        }
    }

    #[test]
    fn greedy_measures_distance_without_wrapping() {
        // A wrapped distance to i32::MIN would make the far coin look closest.
        let coins = [Point(i32::MIN, 0), Point(0, 5)];
        let mut strategy = Greedy::new(rng());

        let direction = strategy
            .decide(Point(0, 0), &coins, &[], i32::MAX)
            .unwrap();
        assert_eq!(direction, "MOVE_DOWN");

        let direction = strategy
            .decide(Point(i32::MAX - 1, 0), &[Point(0, 0)], &[], i32::MAX)
            .unwrap();
        assert_eq!(direction, "MOVE_LEFT");
    }

    #[test]
    fn pathfinder_at_the_edge_of_a_huge_board() {
        let me = Point(i32::MAX - 1, i32::MAX - 1);
        let coin = Point(i32::MAX - 3, i32::MAX - 1);
        let mut strategy = Pathfinder::new(rng());

        let direction = strategy.decide(me, &[coin], &[], i32::MAX).unwrap();
        assert_eq!(direction, "MOVE_LEFT");
    }
}
