//! Integration tests for the learner-facing surface: observations, masks,
//! the environment, and self-play.

use regicide_env::cards::Card;
use regicide_env::core::{EngineConfig, InvalidSacrificePolicy, Move, Outcome, Scenario, ACTION_SPACE_SIZE};
use regicide_env::nn::{Observation, RegicideEncoder, StateEncoder, ZeroValues, OBSERVATION_LEN};
use regicide_env::rules::Regicide;
use regicide_env::training::{
    run_batch, run_episode, BatchSummary, EnvConfig, ExperienceBuffer, FirstLegalPolicy, ModelPolicy, Policy,
    RegicideEnv, RewardConfig, SelfPlayConfig, UniformRandomPolicy,
};

// =============================================================================
// Observation and Encoding
// =============================================================================

#[test]
fn test_observation_tracks_play() {
    let mut env = RegicideEnv::new(EnvConfig::default(), 21);
    let mut policy = UniformRandomPolicy::new(21);

    while !env.is_done() {
        let obs = env.observation();
        let state = env.state();

        assert_eq!(obs.to_vector().len(), OBSERVATION_LEN);
        assert_eq!(obs.hand_size(), state.player_hand().len());
        assert_eq!(usize::from(obs.ally_hand_size), state.ally_hand().len());
        assert_eq!(obs.enemies_left, 12 - state.enemies_defeated());
        assert_eq!(usize::from(obs.tavern_count), state.piles().tavern_len());

        let legal = env.legal_moves();
        let mv = policy.select(env.state(), &legal).unwrap();
        env.step(mv).unwrap();
    }
}

#[test]
fn test_normalized_encoding_stays_in_range() {
    let engine = Regicide::default();
    let encoder = RegicideEncoder::new().with_normalization(true);

    for seed in 0..20 {
        let mut state = engine.new_game(seed);
        let mut policy = UniformRandomPolicy::new(seed);
        while !state.is_terminal() {
            let encoded = encoder.encode(&state);
            assert!(encoded.tensor.iter().all(|v| (0.0..=1.0).contains(v)));

            let legal = engine.legal_moves(&state);
            let mv = policy.select(&state, &legal).unwrap();
            engine.apply(&mut state, mv).unwrap();
        }
    }
}

#[test]
fn test_ally_cards_are_hidden() {
    let state = Regicide::default().new_game(4);
    let other: Vec<Card> = state.piles().tavern().take(7).copied().collect();
    let swapped = Scenario::from_state(state.clone()).ally_hand(&other).build();

    assert_ne!(state.ally_hand(), swapped.ally_hand());
    assert_eq!(Observation::from_state(&state), Observation::from_state(&swapped));
}

#[test]
fn test_mask_matches_enumeration() {
    let env = RegicideEnv::new(EnvConfig::default(), 8);
    let legal = env.legal_moves();
    let mask = env.action_mask();

    assert_eq!(mask.count(), legal.len());
    assert_eq!(mask.legal_ids().map(Move::decode).collect::<Vec<_>>(), legal);
    assert_eq!(mask.to_tensor().len(), ACTION_SPACE_SIZE);
}

// =============================================================================
// Environment
// =============================================================================

#[test]
fn test_episode_rewards_follow_table() {
    let rewards = RewardConfig::default();
    for seed in 0..30 {
        let mut env = RegicideEnv::new(EnvConfig::default(), seed);
        let mut policy = UniformRandomPolicy::new(seed);

        while !env.is_done() {
            let legal = env.legal_moves();
            let mv = policy.select(env.state(), &legal).unwrap();
            let t = env.step(mv).unwrap();
            let report = t.report.as_ref().unwrap();

            match t.outcome {
                Some(Outcome::Victory) | None => {
                    let expected = report.defeated_enemy().map_or(0.0, |(_, level)| f32::from(level + 1));
                    assert_eq!(t.reward, expected);
                }
                Some(_) => assert_eq!(t.reward, rewards.loss),
            }
        }
    }
}

#[test]
fn test_invalid_sacrifice_policy_in_env() {
    let engine = EngineConfig::new().with_invalid_sacrifice(InvalidSacrificePolicy::Defeat);
    let mut env = RegicideEnv::new(EnvConfig::default().with_engine(engine), 5);

    // No card sacrificed against a jack's attack of 10.
    let t = env.step(Move::YIELD).unwrap();
    assert!(t.done);
    assert!(t.rejected.is_none());
    assert_eq!(t.reward, -999_999.0);
    assert!(env.legal_moves().is_empty());
}

#[test]
fn test_reset_after_finish() {
    let mut env = RegicideEnv::new(EnvConfig::default(), 5);
    env.step(Move::YIELD).unwrap();
    assert!(env.is_done());

    let obs = env.reset(6);
    assert!(!env.is_done());
    assert_eq!(obs, Observation::from_state(&Regicide::default().new_game(6)));
}

// =============================================================================
// Self-Play
// =============================================================================

#[test]
fn test_parallel_batch_matches_sequential() {
    let config = SelfPlayConfig::default().with_episodes(16).with_seed_offset(500);
    let parallel = run_batch(&config, UniformRandomPolicy::new);

    let sequential: Vec<_> = (0..config.episodes)
        .map(|i| {
            let seed = config.episode_seed(i);
            run_episode(&config.env, &mut UniformRandomPolicy::new(seed), seed, config.max_steps)
        })
        .collect();

    assert_eq!(parallel, sequential);
}

#[test]
fn test_model_policy_never_rejected() {
    let config = SelfPlayConfig::default().with_episodes(6).with_max_steps(300);
    let trajectories = run_batch(&config, |_| ModelPolicy::new(ZeroValues::new(ACTION_SPACE_SIZE)));

    for t in &trajectories {
        assert!(t.steps.iter().all(|s| s.reward > -999_999.0));
        for step in &t.steps {
            assert!(step.action.index() < ACTION_SPACE_SIZE);
        }
    }
}

#[test]
fn test_trajectory_steps_chain() {
    let traj = run_episode(&EnvConfig::default(), &mut UniformRandomPolicy::new(3), 3, 0);

    assert_eq!(traj.steps[0].observation, Observation::from_state(&Regicide::default().new_game(3)));
    for pair in traj.steps.windows(2) {
        assert_eq!(pair[0].next_observation, pair[1].observation);
        assert_ne!(pair[0].seat, pair[1].seat);
    }
    let rewards: f32 = traj.steps.iter().map(|s| s.reward).sum();
    assert_eq!(rewards, traj.total_reward);
}

#[test]
fn test_buffer_collects_batch() {
    let config = SelfPlayConfig::default().with_episodes(5);
    let trajectories = run_batch(&config, |_| FirstLegalPolicy);
    let summary = BatchSummary::from_trajectories(&trajectories);

    let mut buffer = ExperienceBuffer::new(3);
    for t in trajectories {
        buffer.push(t);
    }
    assert_eq!(buffer.len(), 3);
    assert!(buffer.total_steps() > 0);
    assert_eq!(summary.episodes, 5);
}
