use crate::domain::polar::{
    Foil, Hull, Penalty, PenaltyBoundaries, PenaltyCase, Polar, Sail, Winch,
};

fn penalty_case(timer: u16) -> PenaltyCase {
    PenaltyCase {
        std_timer_sec: timer,
        std_ratio: 0.5,
        pro_timer_sec: timer / 2,
        pro_ratio: 0.75,
        std: PenaltyBoundaries {
            lw: Penalty {
                ratio: 0.5,
                timer: timer / 2,
            },
            hw: Penalty {
                ratio: 0.6,
                timer,
            },
        },
    }
}

/// A small but complete polar: two sails, three wind speeds, three angles.
pub fn sample_polar(id: &str, polar_id: u8) -> Polar {
    Polar {
        id: Some(id.to_string()),
        polar_id,
        archived: false,
        label: format!("test/{}", id),
        global_speed_ratio: 1.0,
        ice_speed_ratio: 0.7,
        auto_sail_change_tolerance: 0.98,
        bad_sail_tolerance: 0.75,
        max_speed: 35.5,
        foil: Foil {
            speed_ratio: 1.04,
            twa_min: 70.0,
            twa_max: 160.0,
            twa_merge: 10.0,
            tws_min: 11.0,
            tws_max: 40.0,
            tws_merge: 5.0,
        },
        hull: Hull { speed_ratio: 1.003 },
        winch: Winch {
            tack: penalty_case(60),
            gybe: penalty_case(70),
            sail_change: penalty_case(120),
            lws: 10,
            hws: 30,
        },
        tws: vec![0, 10, 20],
        twa: vec![40, 90, 140],
        sail: vec![
            Sail {
                id: 1,
                name: "Jib".to_string(),
                speed: vec![
                    vec![0.0, 6.1, 8.4],
                    vec![0.0, 9.3, 12.7],
                    vec![0.0, 7.2, 11.0],
                ],
            },
            Sail {
                id: 2,
                name: "Spi".to_string(),
                speed: vec![
                    vec![0.0, 0.0, 0.0],
                    vec![0.0, 8.9, 13.1],
                    vec![0.0, 9.8, 15.6],
                ],
            },
        ],
    }
}
