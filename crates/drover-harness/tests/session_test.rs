//! End-to-end session tests over the simulated network.
//!
//! Exact-transcript tests pin the conversation byte for byte; grid-robot
//! tests let the server navigate a simulated robot from arbitrary starting
//! poses and verify the secret comes back.

use drover_core::nav::{Direction, TARGET};
use drover_core::SessionError;
use drover_harness::{GridRobot, ScriptedRobot};
use drover_proto::Position;
use turmoil::net::TcpListener;

const ADDR: &str = "server:3999";

fn serve_one(sim: &mut turmoil::Sim<'_>, expected_secret: &'static [u8]) {
    sim.host("server", move || async move {
        let listener = TcpListener::bind("0.0.0.0:3999").await?;
        let (stream, _peer) = listener.accept().await?;
        let secret = drover_core::run(stream).await?;
        assert_eq!(secret, expected_secret);
        Ok(())
    });
}

#[test]
fn robot_already_at_target() {
    let mut sim = turmoil::Builder::new().build();
    serve_one(&mut sim, b"Hello");

    sim.client("robot", async {
        let mut robot = ScriptedRobot::connect(ADDR).await?;
        robot.login(b"Oompa").await?;

        robot.expect(b"102 MOVE").await?;
        robot.say(b"OK -2 2").await?;

        robot.expect(b"105 GET MESSAGE").await?;
        robot.say(b"Hello").await?;

        robot.expect(b"106 LOGOUT").await?;
        robot.expect_closed().await?;
        Ok(())
    });

    sim.run().expect("simulation failed");
}

#[test]
fn orientation_inference_and_navigation_transcript() {
    let mut sim = turmoil::Builder::new().build();
    serve_one(&mut sim, b"UnderTheRock");

    sim.client("robot", async {
        let mut robot = ScriptedRobot::connect(ADDR).await?;
        robot.login(b"Karel").await?;

        // First reply matches the assumed origin, so the server repeats the
        // move; the second pair of positions reveals the heading.
        robot.expect(b"102 MOVE").await?;
        robot.say(b"OK 0 0").await?;
        robot.expect(b"102 MOVE").await?;
        robot.say(b"OK 0 1").await?;

        // Heading is now Up; one more move finishes the y axis.
        robot.expect(b"102 MOVE").await?;
        robot.say(b"OK 0 2").await?;

        // Net left turn, taken as three rights per the rotation rule.
        for _ in 0..3 {
            robot.expect(b"104 TURN RIGHT").await?;
            robot.say(b"OK 0 2").await?;
        }

        robot.expect(b"102 MOVE").await?;
        robot.say(b"OK -1 2").await?;
        robot.expect(b"102 MOVE").await?;
        robot.say(b"OK -2 2").await?;

        robot.expect(b"105 GET MESSAGE").await?;
        robot.say(b"UnderTheRock").await?;

        robot.expect(b"106 LOGOUT").await?;
        robot.expect_closed().await?;
        Ok(())
    });

    sim.run().expect("simulation failed");
}

#[test]
fn navigates_a_grid_robot_from_a_distant_start() {
    let mut sim = turmoil::Builder::new().build();
    serve_one(&mut sim, b"TajneHeslo");

    sim.client("robot", async {
        GridRobot::new("Karel", Position::new(4, -3), Direction::Left)
            .with_secret(TARGET, b"TajneHeslo")
            .serve(ADDR)
            .await?;
        Ok(())
    });

    sim.run().expect("simulation failed");
}

#[test]
fn repeats_move_against_a_blocked_robot() {
    let mut sim = turmoil::Builder::new().build();
    serve_one(&mut sim, b"Hello");

    sim.client("robot", async {
        // Starting on the assumed origin makes the stumble observable: the
        // first confirmation repeats (0, 0) and the server must re-issue
        // the move instead of treating it as progress.
        GridRobot::new("Stumbler", Position::ORIGIN, Direction::Up)
            .with_stumbles(1)
            .with_secret(TARGET, b"Hello")
            .serve(ADDR)
            .await?;
        Ok(())
    });

    sim.run().expect("simulation failed");
}

#[test]
fn sweeps_the_block_until_the_secret_turns_up() {
    let mut sim = turmoil::Builder::new().build();
    serve_one(&mut sim, b"DeepCut");

    sim.client("robot", async {
        // Step 12 of the serpentine sweep; the server has to work through
        // the first half of the block to get there.
        GridRobot::new("Sweeper", Position::new(1, 1), Direction::Down)
            .with_secret(Position::new(0, 0), b"DeepCut")
            .serve(ADDR)
            .await?;
        Ok(())
    });

    sim.run().expect("simulation failed");
}

#[test]
fn exhausted_sweep_is_a_logic_fault() {
    let mut sim = turmoil::Builder::new().build();

    sim.host("server", || async {
        let listener = TcpListener::bind("0.0.0.0:3999").await?;
        let (stream, _peer) = listener.accept().await?;
        let err = drover_core::run(stream).await.unwrap_err();
        assert!(matches!(err, SessionError::Logic(_)), "{err}");
        Ok(())
    });

    sim.client("robot", async {
        // No secret anywhere: the robot answers every pick-up with an empty
        // message and the server must give up after the 25th cell rather
        // than wander off the block.
        GridRobot::new("Empty", Position::new(1, 1), Direction::Up)
            .serve(ADDR)
            .await?;
        Ok(())
    });

    sim.run().expect("simulation failed");
}

#[test]
fn silent_robot_times_out_without_protocol_noise() {
    let mut sim = turmoil::Builder::new().build();

    sim.host("server", || async {
        let listener = TcpListener::bind("0.0.0.0:3999").await?;
        let (stream, _peer) = listener.accept().await?;
        let err = drover_core::run(stream).await.unwrap_err();
        assert!(matches!(err, SessionError::Timeout(_)), "{err}");
        Ok(())
    });

    sim.client("robot", async {
        let mut robot = ScriptedRobot::connect(ADDR).await?;
        // Never send the username; the 1s read window must close the
        // session with nothing on the wire.
        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
        robot.expect_closed().await?;
        Ok(())
    });

    sim.run().expect("simulation failed");
}
