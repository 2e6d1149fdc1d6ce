use button_web::board::{ButtonState, HardwareSnapshot, OutputState};
use button_web::board::sampler::raw_to_celsius;
use button_web::http::response::{RESPONSE_CAPACITY, Renderer, render};

fn snapshot(a: bool, b: bool, temperature_c: f32) -> HardwareSnapshot {
    HardwareSnapshot {
        button_a: a.into(),
        button_b: b.into(),
        temperature_c,
    }
}

#[test]
fn test_render_button_and_temperature_fields() {
    let resp = render(&snapshot(true, false, 36.55), OutputState::Off).unwrap();
    let text = resp.as_str();

    assert!(text.contains("Estado botão A: Pressionado"));
    assert!(text.contains("Estado botão B: Solto"));
    assert!(text.contains("36.55"));
}

#[test]
fn test_render_status_line_and_headers() {
    let resp = render(&snapshot(false, false, 27.0), OutputState::Off).unwrap();
    let text = resp.as_str();

    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("Content-Type: text/html\r\n"));
    assert!(text.contains("\r\n\r\n<!DOCTYPE html>"));
}

#[test]
fn test_render_document_structure() {
    let resp = render(&snapshot(false, true, 27.0), OutputState::On).unwrap();
    let body = resp.body();

    assert!(body.contains("<script> setTimeout(() => location.reload(), 1000); </script>"));
    assert!(body.contains("<html lang='pt-br'>"));
    assert!(body.contains("<title> Atividade 1 </title>"));
    assert!(body.contains("<meta charset='UTF-8'>"));
    assert!(body.contains("<meta name='viewport' content='width=device-width, initial-scale=1.0'>"));
    assert!(body.contains("<p class=\"estado_botao_a\">Estado botão A: Solto</p>"));
    assert!(body.contains("<p class=\"estado_botao_b\">Estado botão B: Pressionado</p>"));
    assert!(body.contains("<p class=\"estado_led\">Estado LED: Ligado</p>"));
    assert!(body.contains("<p class=\"temperature\">Temperatura interna: 27.00 °C</p>"));
    assert!(body.ends_with("</html>\n"));
}

#[test]
fn test_render_two_decimal_places() {
    let resp = render(&snapshot(false, false, 21.0), OutputState::Off).unwrap();
    assert!(resp.as_str().contains("Temperatura interna: 21.00 °C"));

    let resp = render(&snapshot(false, false, -3.456), OutputState::Off).unwrap();
    assert!(resp.as_str().contains("Temperatura interna: -3.46 °C"));
}

#[test]
fn test_render_is_idempotent() {
    let snap = snapshot(true, true, 29.87);
    let first = render(&snap, OutputState::On).unwrap();
    let second = render(&snap, OutputState::On).unwrap();

    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_render_never_exceeds_capacity() {
    let temperatures = [
        raw_to_celsius(0),
        raw_to_celsius(4095),
        0.0,
        -0.0,
        f32::MAX,
        f32::MIN,
        f32::MIN_POSITIVE,
        f32::EPSILON,
        f32::NAN,
        f32::INFINITY,
        f32::NEG_INFINITY,
    ];

    for close in [true, false] {
        let renderer = Renderer::new(close);
        for a in [true, false] {
            for b in [true, false] {
                for output in [OutputState::On, OutputState::Off] {
                    for t in temperatures {
                        let resp = renderer.render(&snapshot(a, b, t), output).unwrap();
                        assert!(resp.len() <= RESPONSE_CAPACITY, "{} bytes for {}", resp.len(), t);
                    }
                }
            }
        }
    }
}

#[test]
fn test_render_content_length_counts_utf8_bytes() {
    let resp = render(&snapshot(true, true, 25.0), OutputState::Off).unwrap();
    let body = resp.body();

    // "botão" and "°" are multi-byte
    assert!(body.len() > body.chars().count());
    assert!(resp.as_str().contains(&format!("Content-Length: {}\r\n", body.len())));
}

#[test]
fn test_button_labels() {
    assert_eq!(ButtonState::Pressed.label(), "Pressionado");
    assert_eq!(ButtonState::Released.label(), "Solto");
}
