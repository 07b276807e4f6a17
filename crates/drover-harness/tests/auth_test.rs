//! Login-exchange tests over the simulated network.

use drover_core::SessionError;
use drover_harness::ScriptedRobot;
use drover_proto::{keyed_hash, CLIENT_KEY, SERVER_KEY};
use turmoil::net::TcpListener;

const ADDR: &str = "server:3999";

fn serve_expecting<F>(sim: &mut turmoil::Sim<'_>, check: F)
where
    F: Fn(SessionError) + Clone + 'static,
{
    sim.host("server", move || {
        let check = check.clone();
        async move {
            let listener = TcpListener::bind("0.0.0.0:3999").await?;
            let (stream, _peer) = listener.accept().await?;
            check(drover_core::run(stream).await.unwrap_err());
            Ok(())
        }
    });
}

#[test]
fn mismatched_code_reports_login_failed() {
    let mut sim = turmoil::Builder::new().build();
    serve_expecting(&mut sim, |err| {
        assert!(matches!(err, SessionError::LoginFailed), "{err}");
    });

    sim.client("robot", async {
        let mut robot = ScriptedRobot::connect(ADDR).await?;
        robot.say(b"Oompa").await?;
        robot
            .expect(keyed_hash(SERVER_KEY, b"Oompa").to_string().as_bytes())
            .await?;

        let wrong = keyed_hash(CLIENT_KEY, b"Oompa").wrapping_add(1);
        robot.say(wrong.to_string().as_bytes()).await?;

        robot.expect(b"300 LOGIN FAILED").await?;
        robot.expect_closed().await?;
        Ok(())
    });

    sim.run().expect("simulation failed");
}

#[test]
fn oversize_username_reports_syntax_error_early() {
    let mut sim = turmoil::Builder::new().build();
    serve_expecting(&mut sim, |err| {
        assert!(matches!(err, SessionError::Syntax(_)), "{err}");
    });

    sim.client("robot", async {
        let mut robot = ScriptedRobot::connect(ADDR).await?;
        // Twenty name bytes and no terminator yet: after byte 19 the name
        // can no longer fit the 18-byte bound, so the server must bail
        // without waiting for the rest.
        robot.say_raw(&[b'N'; 20]).await?;

        robot.expect(b"301 SYNTAX ERROR").await?;
        robot.expect_closed().await?;
        Ok(())
    });

    sim.run().expect("simulation failed");
}

#[test]
fn non_digit_code_reports_syntax_error() {
    let mut sim = turmoil::Builder::new().build();
    serve_expecting(&mut sim, |err| {
        assert!(matches!(err, SessionError::Syntax(_)), "{err}");
    });

    sim.client("robot", async {
        let mut robot = ScriptedRobot::connect(ADDR).await?;
        robot.say(b"Oompa").await?;
        let _offered = robot.hear().await?;
        robot.say(b"12x45").await?;

        robot.expect(b"301 SYNTAX ERROR").await?;
        robot.expect_closed().await?;
        Ok(())
    });

    sim.run().expect("simulation failed");
}

#[test]
fn overlong_code_reports_syntax_error() {
    let mut sim = turmoil::Builder::new().build();
    serve_expecting(&mut sim, |err| {
        assert!(matches!(err, SessionError::Syntax(_)), "{err}");
    });

    sim.client("robot", async {
        let mut robot = ScriptedRobot::connect(ADDR).await?;
        robot.say(b"Oompa").await?;
        let _offered = robot.hear().await?;
        // Six digits clear the 10-byte read bound; only the stricter
        // post-read check can reject them.
        robot.say(b"123456").await?;

        robot.expect(b"301 SYNTAX ERROR").await?;
        robot.expect_closed().await?;
        Ok(())
    });

    sim.run().expect("simulation failed");
}

#[test]
fn empty_username_is_still_hashed() {
    // An empty name is legal: the hash degenerates to the bare key.
    let mut sim = turmoil::Builder::new().build();

    sim.host("server", || async {
        let listener = TcpListener::bind("0.0.0.0:3999").await?;
        let (stream, _peer) = listener.accept().await?;
        let secret = drover_core::run(stream).await?;
        assert_eq!(secret, b"x");
        Ok(())
    });

    sim.client("robot", async {
        let mut robot = ScriptedRobot::connect(ADDR).await?;
        robot.login(b"").await?;

        robot.expect(b"102 MOVE").await?;
        robot.say(b"OK -2 2").await?;
        robot.expect(b"105 GET MESSAGE").await?;
        robot.say(b"x").await?;
        robot.expect(b"106 LOGOUT").await?;
        Ok(())
    });

    sim.run().expect("simulation failed");
}
