//! End-to-end tests: assemble a spec and push it through the mock writer.

use busylight_hid_protocol::encode::{Color, Command, Duration, Light, Repeat, Tone};
use busylight_hid_protocol::{BUFFER_LEN, BusylightSpec, Step, verify_checksum};
use busylight_hid_transport::mock::MockSpecWriter;
use busylight_hid_transport::{SpecWriter, TransportError, output_report, send_spec};
use proptest::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn three_step_spec() -> Result<BusylightSpec, busylight_hid_protocol::ProtocolError> {
    let blink = |light: Light, next: u8| {
        Step::builder()
            .command(Command::jump(next))
            .repeat(Repeat::times(2))
            .light(light)
            .timing(Duration::seconds(0.3), Duration::seconds(0.3))
            .tone(Tone::off())
            .build()
    };
    BusylightSpec::builder()
        .append(blink(Light::Red, 1))?
        .append(blink(Light::Green, 2))?
        .append(blink(Light::Blue, 0))?
        .build()
}

#[test]
fn sends_exactly_the_serialized_buffer() -> TestResult {
    let spec = three_step_spec()?;
    let mut writer = MockSpecWriter::new();
    let observer = writer.clone();

    send_spec(&mut writer, &spec)?;

    let history = observer.get_write_history();
    assert_eq!(history.len(), 1);
    let sent = history.first().ok_or("nothing was written")?;
    assert_eq!(*sent, spec.to_bytes());
    assert!(verify_checksum(sent));
    Ok(())
}

#[test]
fn short_write_is_an_error() -> TestResult {
    let spec = three_step_spec()?;
    let mut writer = MockSpecWriter::new();
    writer.truncate_writes(32);

    let err = send_spec(&mut writer, &spec);
    assert!(matches!(
        err,
        Err(TransportError::ShortWrite {
            written: 32,
            expected: BUFFER_LEN
        })
    ));
    Ok(())
}

#[test]
fn disconnected_device_is_reported_without_retry() -> TestResult {
    let spec = three_step_spec()?;
    let mut writer = MockSpecWriter::new();
    let observer = writer.clone();
    observer.disconnect();

    assert!(matches!(
        send_spec(&mut writer, &spec),
        Err(TransportError::Disconnected)
    ));
    assert!(observer.get_write_history().is_empty());
    Ok(())
}

#[test]
fn writer_is_usable_as_trait_object() -> TestResult {
    let spec = BusylightSpec::builder()
        .append(
            Step::builder()
                .color(Color::intensity(50), Color::OFF, Color::OFF)
                .build(),
        )?
        .build()?;
    let mock = MockSpecWriter::new();
    let mut boxed: Box<dyn SpecWriter> = Box::new(mock.clone());

    send_spec(boxed.as_mut(), &spec)?;
    send_spec(boxed.as_mut(), &spec)?;
    assert_eq!(mock.get_write_history().len(), 2);
    Ok(())
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(200))]

    /// The HID report is always the report ID followed by the untouched buffer.
    #[test]
    fn prop_output_report_wraps_buffer(buffer in prop::array::uniform32(any::<u8>())) {
        let mut full = [0u8; BUFFER_LEN];
        for (dst, src) in full.iter_mut().zip(buffer.iter().cycle()) {
            *dst = *src;
        }
        let report = output_report(&full);
        prop_assert_eq!(report.first().copied(), Some(0x00));
        prop_assert_eq!(report.get(1..), Some(&full[..]));
    }
}
