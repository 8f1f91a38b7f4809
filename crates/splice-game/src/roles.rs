//! Drawer/guesser assignment.
//!
//! Each round, `num_tiles` players are picked uniformly at random to draw,
//! one per panel; everyone else guesses. The pick is a partial
//! Fisher–Yates shuffle of the roster indices, so it always terminates in
//! O(N) and every drawer subset of the requested size is equally likely.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::{GameError, Player, Role};

/// Checks that `num_tiles` drawers can be chosen from `available` players.
///
/// # Errors
/// [`GameError::InvalidRoleAssignment`] if `num_tiles` is 0 or larger than
/// `available`.
pub fn check_tile_count(num_tiles: usize, available: usize) -> Result<(), GameError> {
    if num_tiles == 0 || num_tiles > available {
        return Err(GameError::InvalidRoleAssignment {
            requested: num_tiles,
            available,
        });
    }
    Ok(())
}

/// Resets every player to guesser, then promotes `num_tiles` of them to
/// drawers with panels `0..num_tiles`.
///
/// Nothing is touched if the tile count is invalid.
pub fn assign_roles<R: Rng + ?Sized>(
    players: &mut [Player],
    num_tiles: usize,
    rng: &mut R,
) -> Result<(), GameError> {
    check_tile_count(num_tiles, players.len())?;

    for player in players.iter_mut() {
        player.set_role(Role::Guesser);
    }

    let mut order: Vec<usize> = (0..players.len()).collect();
    let (chosen, _) = order.partial_shuffle(rng, num_tiles);
    for (panel, &index) in chosen.iter().enumerate() {
        players[index].set_role(Role::Drawer { panel });
    }

    Ok(())
}

/// Builds the game's RNG: seeded for reproducible tests, OS entropy
/// otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use splice_protocol::PlayerId;

    use super::*;
    use crate::PlayerOptions;

    fn roster(n: u64) -> Vec<Player> {
        (0..n)
            .map(|i| {
                Player::new(
                    PlayerId(i),
                    PlayerOptions::new(format!("sock-{i}"), format!("player {i}")),
                )
            })
            .collect()
    }

    fn drawer_panels(players: &[Player]) -> Vec<usize> {
        let mut panels: Vec<usize> = players.iter().filter_map(Player::panel_slot).collect();
        panels.sort_unstable();
        panels
    }

    #[test]
    fn test_assign_roles_exact_drawer_count_and_distinct_panels() {
        let mut rng = rng_from_seed(Some(7));
        for n in 1..=10u64 {
            for tiles in 1..=n as usize {
                let mut players = roster(n);
                assign_roles(&mut players, tiles, &mut rng).unwrap();

                assert_eq!(drawer_panels(&players), (0..tiles).collect::<Vec<_>>());
                let guessers = players.iter().filter(|p| p.is_guesser()).count();
                assert_eq!(guessers, n as usize - tiles);
                assert!(players.iter().all(|p| p.role().is_some()));
            }
        }
    }

    #[test]
    fn test_assign_roles_all_players_draw_when_tiles_equal_roster() {
        let mut players = roster(4);
        assign_roles(&mut players, 4, &mut rng_from_seed(Some(1))).unwrap();
        assert!(players.iter().all(Player::is_drawer));
    }

    #[test]
    fn test_assign_roles_resets_previous_round() {
        let mut rng = rng_from_seed(Some(3));
        let mut players = roster(6);
        assign_roles(&mut players, 5, &mut rng).unwrap();
        assign_roles(&mut players, 1, &mut rng).unwrap();
        assert_eq!(drawer_panels(&players), vec![0]);
        assert_eq!(players.iter().filter(|p| p.is_guesser()).count(), 5);
    }

    #[test]
    fn test_assign_roles_too_many_tiles_fails_without_mutation() {
        let mut players = roster(3);
        let err = assign_roles(&mut players, 4, &mut rng_from_seed(Some(1))).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidRoleAssignment {
                requested: 4,
                available: 3
            }
        );
        assert!(players.iter().all(|p| p.role().is_none()));
    }

    #[test]
    fn test_assign_roles_zero_tiles_fails() {
        let mut players = roster(3);
        assert!(assign_roles(&mut players, 0, &mut rng_from_seed(None)).is_err());
    }

    #[test]
    fn test_assign_roles_same_seed_same_drawers() {
        let pick = |seed| {
            let mut players = roster(8);
            assign_roles(&mut players, 3, &mut rng_from_seed(Some(seed))).unwrap();
            players.iter().map(Player::role).collect::<Vec<_>>()
        };
        assert_eq!(pick(42), pick(42));
    }

    #[test]
    fn test_assign_roles_reaches_every_player() {
        // Over many rounds every player should get to draw at least once.
        let mut rng = rng_from_seed(Some(11));
        let mut players = roster(6);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            assign_roles(&mut players, 2, &mut rng).unwrap();
            seen.extend(players.iter().filter(|p| p.is_drawer()).map(Player::id));
        }
        assert_eq!(seen.len(), 6);
    }
}
