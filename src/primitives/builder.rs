//! Primitive sequences for the two figure kinds.

use super::style::{ArrowDecoration, Color, Font, Length, MarkerShape, MarkerStyle, Pen};
use super::{Marker, PathKind, PathPrimitive, Primitive, Role, TextLabel};
use crate::figure::LegendEntry;
use crate::geo::GeoPoint;

/// Northward offset of endpoint labels, in degrees.
pub const LABEL_OFFSET_DEG: f64 = 2.0;

const OUTLINE: Pen = Pen::new(Length::Points(1.0), Color::Black);

fn station_marker(position: GeoPoint) -> Primitive {
    Primitive::Marker(Marker {
        position,
        role: Role::Station,
        style: MarkerStyle {
            shape: MarkerShape::InvertedTriangle,
            size: Length::Points(2.0),
        },
        fill: Color::Blue,
        stroke: Pen::new(Length::Points(0.25), Color::Black),
        label: Some("Station".to_string()),
    })
}

fn event_marker(position: GeoPoint) -> Primitive {
    Primitive::Marker(Marker {
        position,
        role: Role::Event,
        style: MarkerStyle {
            shape: MarkerShape::Star,
            size: Length::Points(15.0),
        },
        fill: Color::Red,
        stroke: Pen::new(Length::Points(0.25), Color::Black),
        label: Some("Event".to_string()),
    })
}

fn endpoint_marker(position: GeoPoint) -> Primitive {
    Primitive::Marker(Marker {
        position,
        role: Role::Endpoint,
        style: MarkerStyle {
            shape: MarkerShape::Circle,
            size: Length::Centimetres(0.3),
        },
        fill: Color::Blue,
        stroke: OUTLINE,
        label: None,
    })
}

fn endpoint_label(position: GeoPoint, text: &str) -> Primitive {
    Primitive::TextLabel(TextLabel {
        position: position.offset_latitude(LABEL_OFFSET_DEG),
        text: text.to_string(),
        font: Font {
            size: Length::Points(10.0),
            family: "Helvetica".to_string(),
            color: Color::Blue,
        },
    })
}

/// Primitives for the global event/station map.
///
/// Station markers come first, then the event marker, then one projected
/// straight segment from the event to every station. An empty station list
/// yields the event marker alone.
pub fn build_event_map_primitives(stations: &[GeoPoint], event: GeoPoint) -> Vec<Primitive> {
    let mut primitives = Vec::with_capacity(2 * stations.len() + 1);

    primitives.extend(stations.iter().copied().map(station_marker));
    primitives.push(event_marker(event));
    primitives.extend(stations.iter().map(|station| {
        Primitive::Path(PathPrimitive {
            from: event,
            to: *station,
            kind: PathKind::ProjectedStraight,
            pen: Pen::new(Length::Points(1.0), Color::Red),
            decoration: None,
            label: None,
        })
    }));

    primitives
}

/// Primitives for the two-point geodetic map.
///
/// One great-circle arc, then the two endpoint markers, then the two labels
/// placed [`LABEL_OFFSET_DEG`] north of each point.
pub fn build_geodetic_primitives(point1: GeoPoint, point2: GeoPoint) -> Vec<Primitive> {
    let pen = Pen::new(Length::Points(1.0), Color::Blue);
    let arc = Primitive::Path(PathPrimitive {
        from: point1,
        to: point2,
        kind: PathKind::GreatCircleArc,
        pen,
        decoration: Some(ArrowDecoration {
            head_length: Length::Centimetres(0.5),
            endpoint_coordinates: true,
            head_at_begin: false,
            head_at_end: true,
            apex_angle_deg: 30.0,
            fill: Color::Blue,
            head_shape: 0.5,
            pen,
        }),
        label: None,
    });

    vec![
        arc,
        endpoint_marker(point1),
        endpoint_marker(point2),
        endpoint_label(point1, "Point 1"),
        endpoint_label(point2, "Point 2"),
    ]
}

/// One legend entry per distinct marker label, in first-seen order.
pub fn legend_entries(primitives: &[Primitive]) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = Vec::new();
    for marker in primitives.iter().filter_map(Primitive::as_marker) {
        let Some(label) = &marker.label else {
            continue;
        };
        if entries.iter().any(|entry| &entry.label == label) {
            continue;
        }
        entries.push(LegendEntry {
            label: label.clone(),
            style: marker.style,
            fill: marker.fill,
            stroke: marker.stroke,
        });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pt(lon: f64, lat: f64) -> GeoPoint {
        GeoPoint::new(lon, lat).unwrap()
    }

    fn kinds(primitives: &[Primitive]) -> Vec<&'static str> {
        primitives.iter().map(Primitive::kind_name).collect()
    }

    #[test]
    fn test_event_map_order() {
        let stations = [pt(10.0, 0.0), pt(20.0, 5.0), pt(30.0, -5.0)];
        let event = pt(100.0, 10.0);
        let primitives = build_event_map_primitives(&stations, event);

        assert_eq!(
            kinds(&primitives),
            vec!["marker", "marker", "marker", "marker", "path", "path", "path"]
        );

        let markers: Vec<&Marker> = primitives.iter().filter_map(Primitive::as_marker).collect();
        assert!(markers[..3].iter().all(|m| m.role == Role::Station));
        assert_eq!(markers[3].role, Role::Event);
        assert_eq!(markers[3].style.to_string(), "a15p");
        assert_eq!(markers[0].style.to_string(), "i2p");

        for (path, station) in primitives
            .iter()
            .filter_map(Primitive::as_path)
            .zip(stations.iter())
        {
            assert_eq!(path.from, event);
            assert_eq!(path.to, *station);
            assert!(!path.is_great_circle());
            assert_eq!(path.pen.to_string(), "1p,red");
        }
    }

    #[test]
    fn test_event_map_without_stations() {
        let primitives = build_event_map_primitives(&[], pt(0.0, 0.0));
        assert_eq!(primitives.len(), 1);
        assert_eq!(primitives[0].as_marker().map(|m| m.role), Some(Role::Event));
    }

    #[test]
    fn test_geodetic_primitives() {
        let vienna = pt(16.3738, 48.2082);
        let delhi = pt(77.1025, 28.7041);
        let primitives = build_geodetic_primitives(vienna, delhi);

        assert_eq!(
            kinds(&primitives),
            vec!["path", "marker", "marker", "text_label", "text_label"]
        );

        let arc = primitives[0].as_path().unwrap();
        assert!(arc.is_great_circle());
        assert_eq!(
            arc.decoration.map(|d| d.to_string()),
            Some("=0.5c+s+e+a30+gblue+h0.5+p1p,blue".to_string())
        );

        // Markers sit on the path endpoints
        assert_eq!(primitives[1].as_marker().unwrap().position, arc.from);
        assert_eq!(primitives[2].as_marker().unwrap().position, arc.to);

        let label1 = primitives[3].as_text_label().unwrap();
        let label2 = primitives[4].as_text_label().unwrap();
        assert_eq!(label1.text, "Point 1");
        assert_eq!(label2.text, "Point 2");
        assert_eq!(label1.position.latitude, vienna.latitude + LABEL_OFFSET_DEG);
        assert_eq!(label2.position.longitude, delhi.longitude);
        assert_eq!(label1.font.to_string(), "10p,Helvetica,blue");
    }

    #[test]
    fn test_legend_entries_deduplicate() {
        let stations = [pt(10.0, 0.0), pt(20.0, 5.0)];
        let primitives = build_event_map_primitives(&stations, pt(0.0, 0.0));
        let labels: Vec<String> = legend_entries(&primitives)
            .into_iter()
            .map(|entry| entry.label)
            .collect();
        assert_eq!(labels, vec!["Station".to_string(), "Event".to_string()]);

        let geodetic = build_geodetic_primitives(pt(0.0, 0.0), pt(1.0, 1.0));
        assert!(legend_entries(&geodetic).is_empty());
    }
}
