//! The raymarching fragment shader and the uniform names it exposes.
//!
//! The scene is a displaced rounded box whose surface pulses with a
//! time-driven rhythm, lit with one reflection bounce, gamma correction and
//! a sun specular. With no input the camera orbits on its own; while
//! `pointers[0].x > 0` the first pointer steers it instead.
//!
//! Shader artwork by Matthias Hurrle (@atzedent).

use crate::pointer::MAX_POINTERS;

/// `float` uniform: seconds since start.
pub const TIME_UNIFORM: &str = "time";

/// `vec2` uniform: canvas size in physical pixels.
pub const RESOLUTION_UNIFORM: &str = "resolution";

/// `vec2[MAX_POINTERS]` uniform: pointer positions, bottom-left origin.
pub const POINTERS_UNIFORM: &str = "pointers";

/// GLSL ES 1.00 fragment shader.
pub const RAYMARCH_FRAGMENT_SHADER: &str = r#"
#ifdef GL_FRAGMENT_PRECISION_HIGH
precision highp float;
#else
precision mediump float;
#endif

uniform vec2 resolution;
uniform float time;
uniform vec2 pointers[10];

#define MAX_STEPS 100
#define MAX_DIST 100.
#define SURF_DIST .001

#define T time
#define mouse pointers[0]

mat2 Rot(float a) {
    float s = sin(a), c = cos(a);
    return mat2(c, -s, s, c);
}

float sdRoundBox(vec3 p, vec3 b, float r) {
    vec3 q = abs(p) - b;
    return length(max(q, .0)) + min(max(q.x, max(q.y, q.z)), .0) - r;
}

float displacement(in vec3 p, float v) {
    return sin(v * p.x) * sin(v * p.y) * sin(v * p.z);
}

float opDisplace(in vec3 p, float v) {
    p *= 1.0 + vec3(-.1, .1, -.1) * (.5 * sin(T * 10.) + .5);
    float d1 = sdRoundBox(p, vec3(1.), .1);
    float d2 = displacement(p, v);
    return d1 + d2;
}

float Rythm() {
    float md = mod(-T, 1.);
    return -max(
        md * (.5 * -cos(T) - .5),
        md * (.5 * sin(T) - .5)
    );
}

float GetDist(vec3 p) {
    return opDisplace(p, 22. * Rythm());
}

float RayMarch(vec3 ro, vec3 rd) {
    float dO = .0;
    for (int i = 0; i < MAX_STEPS; i++) {
        vec3 p = ro + rd * dO;
        float dS = GetDist(p);
        dO += dS;
        if (dO > MAX_DIST || abs(dS) < SURF_DIST) break;
    }
    return dO;
}

vec3 GetNormal(vec3 p) {
    float d = GetDist(p);
    vec2 e = vec2(SURF_DIST, 0.);
    vec3 n = d - vec3(
        GetDist(p - e.xyy),
        GetDist(p - e.yxy),
        GetDist(p - e.yyx));
    return normalize(n);
}

vec3 Render(inout vec3 ro, inout vec3 rd) {
    float d = RayMarch(ro, rd);
    vec3 col = vec3(.0);

    if (d < MAX_DIST) {
        vec3 p = ro + rd * d;
        vec3 n = GetNormal(p);
        vec3 r = reflect(rd, n);

        float diffuse = dot(n, normalize(vec3(1., 2., 3.))) * .5 + .5;

        vec3 light = normalize(ro);
        float spot = clamp(dot(light, reflect(n, vec3(.0, 1., .0))), .0, 1.);

        col = vec3(diffuse);
        col += vec3(pow(spot, 16.));

        ro = p + n * SURF_DIST * 3.;
        rd = r;
    }

    return col;
}

vec3 GetRayDir(vec2 uv, vec3 p, vec3 l, float z) {
    vec3 f = normalize(l - p),
        r = normalize(cross(vec3(.0, 1., .0), f)),
        u = cross(f, r),
        c = f * z,
        i = c + uv.x * r + uv.y * u;
    return normalize(i);
}

void mainImage(out vec4 fragColor, in vec2 fragCoord) {
    float mx = max(resolution.x, resolution.y);
    vec2 uv = (2. * fragCoord.xy - resolution.xy) / mx;
    uv *= .5;

    vec2 m = mouse.xy / resolution.xy;

    vec3 ro = vec3(0., 3., -6.);
    ro.yz *= Rot(mouse.x > .0 ? -m.y * 3.14159 + 1. : cos(T));
    ro.xz *= Rot(mouse.x > .0 ? -m.x * 6.28318 : sin(T));

    vec3 rd = GetRayDir(uv, ro, vec3(.0), 1.);

    vec3 col = Render(ro, rd);
    vec3 bounce = Render(ro, rd);
    col += bounce;

    col = pow(col, vec3(.5));

    float rhm = Rythm();
    col = vec3(1. - rhm, rhm, 1. - rhm) - (1. - col);

    vec3 light = normalize(ro);
    vec3 sunlight = vec3(1., .95, .9);
    float sun = clamp(dot(light, reflect(rd, vec3(.0, 1., .0))), .0, 1.);

    col += .2 * sunlight * pow(sun, 16.);
    col += .5 * sunlight * pow(sun, 96.);

    fragColor = vec4(col, 1.);
}

void main() {
    vec4 fragment_color;
    mainImage(fragment_color, gl_FragCoord.xy);
    gl_FragColor = fragment_color;
}
"#;
